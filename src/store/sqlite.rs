//! SQLite-backed lock store.

use super::record::LockRecord;
use super::{LockStore, LockTransaction};
use crate::config::Config;
use crate::config::operations::validate_table_name;
use crate::error::{LeaseError, Result};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Lock store over a SQLite database file.
///
/// Holds no connection of its own: each transaction opens one and drops it
/// when done, so independent processes can point at the same file.
///
/// SQLite has no row locks. Every decision transaction takes the database
/// write lock, so attempts on *different* lock names also wait for each
/// other, for at most one decision transaction each and never longer than
/// the busy timeout.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    table: String,
    busy_timeout: Duration,
}

impl SqliteStore {
    /// Default time to wait for another transaction's write lock.
    pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a store handle for `table` in the database at `path`.
    ///
    /// No I/O happens here; the table name is validated so it can be
    /// spliced into SQL text.
    pub fn new(path: impl Into<PathBuf>, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        validate_table_name(&table)?;
        Ok(Self {
            path: path.into(),
            table,
            busy_timeout: Self::DEFAULT_BUSY_TIMEOUT,
        })
    }

    /// Create a store handle from a validated config.
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(&config.database, &config.table)?.with_busy_timeout(config.busy_timeout()))
    }

    /// Bound how long a transaction blocks on a concurrent writer.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Path to the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the lock table.
    pub fn table(&self) -> &str {
        &self.table
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).map_err(|e| {
            LeaseError::unavailable(
                format!("failed to open database '{}'", self.path.display()),
                e,
            )
        })?;

        conn.busy_timeout(self.busy_timeout).map_err(|e| {
            LeaseError::unavailable(
                format!("failed to configure database '{}'", self.path.display()),
                e,
            )
        })?;

        Ok(conn)
    }

    /// Create the lock table if it does not exist yet.
    pub fn create_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                name   TEXT PRIMARY KEY NOT NULL,
                owner  TEXT NOT NULL,
                expiry TEXT NOT NULL
            )",
            self.table
        ))
        .map_err(|e| {
            LeaseError::store(format!("failed to create table '{}'", self.table), e)
        })
    }

    /// List every lock record, ordered by name.
    pub fn list_records(&self) -> Result<Vec<LockRecord>> {
        let conn = self.connect()?;
        let context = || format!("failed to list locks in '{}'", self.table);

        let mut stmt = conn
            .prepare(&format!(
                "SELECT name, owner, expiry FROM {} ORDER BY name",
                self.table
            ))
            .map_err(|e| LeaseError::store(context(), e))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(LockRecord {
                    name: row.get(0)?,
                    owner: row.get(1)?,
                    expiry: row.get(2)?,
                })
            })
            .map_err(|e| LeaseError::store(context(), e))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| LeaseError::store(context(), e))
    }
}

impl LockStore for SqliteStore {
    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LockTransaction) -> Result<T>,
    {
        let mut conn = self.connect()?;

        // IMMEDIATE takes the database write lock before the first read, which
        // is SQLite's stand-in for SELECT ... FOR UPDATE.
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| LeaseError::store("failed to begin transaction", e))?;

        let mut scoped = SqliteTransaction {
            tx,
            table: &self.table,
        };

        match f(&mut scoped) {
            Ok(value) => {
                scoped
                    .tx
                    .commit()
                    .map_err(|e| LeaseError::store("failed to commit transaction", e))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = scoped.tx.rollback() {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// A transaction against the lock table.
struct SqliteTransaction<'c> {
    tx: rusqlite::Transaction<'c>,
    table: &'c str,
}

impl LockTransaction for SqliteTransaction<'_> {
    fn select_for_update(&mut self, name: &str) -> Result<Option<LockRecord>> {
        self.tx
            .query_row(
                &format!(
                    "SELECT name, owner, expiry FROM {} WHERE name = ?1",
                    self.table
                ),
                params![name],
                |row| {
                    Ok(LockRecord {
                        name: row.get(0)?,
                        owner: row.get(1)?,
                        expiry: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(|e| LeaseError::store(format!("failed to read lock '{}'", name), e))
    }

    fn insert(&mut self, record: &LockRecord) -> Result<()> {
        self.tx
            .execute(
                &format!(
                    "INSERT INTO {} (name, owner, expiry) VALUES (?1, ?2, ?3)",
                    self.table
                ),
                params![record.name, record.owner, record.expiry],
            )
            .map(|_| ())
            .map_err(|e| {
                LeaseError::store(format!("failed to insert lock '{}'", record.name), e)
            })
    }

    fn update(&mut self, record: &LockRecord) -> Result<()> {
        let changed = self
            .tx
            .execute(
                &format!(
                    "UPDATE {} SET owner = ?1, expiry = ?2 WHERE name = ?3",
                    self.table
                ),
                params![record.owner, record.expiry, record.name],
            )
            .map_err(|e| {
                LeaseError::store(format!("failed to update lock '{}'", record.name), e)
            })?;

        if changed != 1 {
            return Err(LeaseError::store(
                format!("failed to update lock '{}'", record.name),
                rusqlite::Error::StatementChangedRows(changed),
            ));
        }

        Ok(())
    }
}
