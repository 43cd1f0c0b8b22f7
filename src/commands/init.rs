//! Implementation of the `dblease init` command.
//!
//! 1. Writes a default `dblease.yaml` (or the `--config` path) if missing
//! 2. Creates the lock table in the configured database if missing
//!
//! Running it again changes nothing.

use super::load_config;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{LeaseError, Result};
use crate::exit_codes;
use crate::store::SqliteStore;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Execute the `dblease init` command.
pub fn cmd_init(config_path: Option<&Path>, database: Option<PathBuf>) -> Result<i32> {
    let path = config_path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));

    if path.exists() {
        println!("Config exists: {}", path.display());
    } else {
        let mut template = Config::default();
        if let Some(database) = &database {
            template.database = database.clone();
        }
        write_new_config(path, &template)?;
        println!("Wrote config: {}", path.display());
    }

    let config = load_config(Some(path), database)?;
    let store = SqliteStore::open(&config)?;
    store.create_schema()?;

    tracing::info!(database = %store.path().display(), table = store.table(), "schema ready");
    println!(
        "Lock table '{}' ready in {}",
        store.table(),
        store.path().display()
    );

    Ok(exit_codes::SUCCESS)
}

/// Write `config` to `path`, failing if the file already exists.
fn write_new_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = config.to_yaml()?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            LeaseError::UserError(format!(
                "failed to create config file '{}': {}",
                path.display(),
                e
            ))
        })?;

    file.write_all(yaml.as_bytes()).map_err(|e| {
        LeaseError::UserError(format!(
            "failed to write config file '{}': {}",
            path.display(),
            e
        ))
    })
}
