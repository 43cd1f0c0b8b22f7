//! Lock store for dblease.
//!
//! The store is the single relational table that holds one row per lock name:
//!
//! | column   | type | notes        |
//! |----------|------|--------------|
//! | `name`   | TEXT | primary key  |
//! | `owner`  | TEXT | owner token  |
//! | `expiry` | TEXT | UTC instant  |
//!
//! # Transactions
//!
//! Every lease decision runs inside [`LockStore::transact`]. The store opens a
//! connection, begins a transaction that locks the row before reading it,
//! hands a [`LockTransaction`] to the caller, and commits only when the caller
//! returns `Ok`. Any error rolls the transaction back, so a failed decision
//! never leaves a half-written row behind. The connection is dropped on every
//! exit path.

mod record;
mod sqlite;


// Re-export public API
pub use record::LockRecord;
pub use sqlite::SqliteStore;

use crate::error::Result;
use std::sync::Arc;

/// Row operations available inside one decision transaction.
pub trait LockTransaction {
    /// Read the record for `name` under an exclusive lock.
    ///
    /// Blocks while another transaction is evaluating the same lock and
    /// returns `None` when no row exists yet.
    fn select_for_update(&mut self, name: &str) -> Result<Option<LockRecord>>;

    /// Insert a record for a name that has no row yet.
    fn insert(&mut self, record: &LockRecord) -> Result<()>;

    /// Replace `owner` and `expiry` of an existing row.
    fn update(&mut self, record: &LockRecord) -> Result<()>;
}

/// A relational store that can run a function inside one transaction.
pub trait LockStore {
    /// Run `f` in a fresh transaction.
    ///
    /// Commits when `f` returns `Ok`, rolls back when it returns `Err`,
    /// and releases the underlying connection in both cases.
    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LockTransaction) -> Result<T>;
}

impl<S: LockStore> LockStore for &S {
    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LockTransaction) -> Result<T>,
    {
        (**self).transact(f)
    }
}

impl<S: LockStore> LockStore for Arc<S> {
    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LockTransaction) -> Result<T>,
    {
        (**self).transact(f)
    }
}
