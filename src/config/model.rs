//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dblease.yaml";

/// Environment variable that overrides the configured database path.
pub const DATABASE_ENV_VAR: &str = "DBLEASE_DATABASE";

/// Configuration for the lock store and lease defaults.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the SQLite database holding the lock table.
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Name of the lock table (default: "dist_lock").
    #[serde(default = "default_table")]
    pub table: String,

    /// Lease length used when `run` is not given `--lease`.
    #[serde(default = "default_lease_seconds")]
    pub default_lease_seconds: u64,

    /// How long a decision transaction may wait for the store's write lock.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_database() -> PathBuf {
    PathBuf::from("dblease.sqlite3")
}

fn default_table() -> String {
    "dist_lock".to_string()
}

fn default_lease_seconds() -> u64 {
    60
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            table: default_table(),
            default_lease_seconds: default_lease_seconds(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}
