//! dblease: lease-based mutual exclusion over a shared relational store.
//!
//! Independent processes that can reach the same database coordinate a named
//! critical section without a dedicated lock service. A [`lease::Coordinator`]
//! makes one non-blocking attempt per call: it reads the lock row under an
//! exclusive lock, claims the lease when the row is missing, already ours, or
//! expired, and commits. The caller's work runs only when the lease was
//! claimed. Any store error fails closed.
//!
//! ```no_run
//! use dblease::lease::Coordinator;
//! use dblease::store::SqliteStore;
//! use std::time::Duration;
//!
//! let store = SqliteStore::new("locks.sqlite3", "dist_lock")?;
//! store.create_schema()?;
//!
//! let coordinator = Coordinator::new(store);
//! coordinator.run_under_lock("nightly-report", Duration::from_secs(300), || {
//!     println!("only one process prints this per lease");
//! });
//! # Ok::<(), dblease::error::LeaseError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod lease;
pub mod logging;
pub mod store;

#[cfg(test)]
mod test_support;
