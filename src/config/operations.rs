//! Config loading, validation, and resolution.

use super::model::{Config, DATABASE_ENV_VAR, DEFAULT_CONFIG_FILE};
use crate::error::{LeaseError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

static TABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("valid regex"));

/// Check that `table` can be spliced into SQL as a bare identifier.
pub(crate) fn validate_table_name(table: &str) -> Result<()> {
    if TABLE_NAME.is_match(table) {
        Ok(())
    } else {
        Err(LeaseError::ConfigError(format!(
            "table '{}' must be an identifier (letters, digits, underscores; at most 63 chars)",
            table
        )))
    }
}

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(LeaseError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LeaseError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| LeaseError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| LeaseError::ConfigError(format!("failed to serialize config: {}", e)))
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `table` must be a plain SQL identifier
    /// - `default_lease_seconds` must be positive
    /// - `database` must not be empty
    pub fn validate(&self) -> Result<()> {
        validate_table_name(&self.table)?;

        if self.default_lease_seconds == 0 {
            return Err(LeaseError::ConfigError(
                "default_lease_seconds must be greater than 0".to_string(),
            ));
        }

        if self.database.as_os_str().is_empty() {
            return Err(LeaseError::ConfigError(
                "database path must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Without one, `dblease.yaml` in the working
    /// directory is used when present, otherwise defaults. `DBLEASE_DATABASE`
    /// overrides the database path in every case.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(database) = std::env::var(DATABASE_ENV_VAR)
            && !database.is_empty()
        {
            config.database = PathBuf::from(database);
        }

        Ok(config)
    }

    /// The default lease as a duration.
    pub fn default_lease(&self) -> Duration {
        Duration::from_secs(self.default_lease_seconds)
    }

    /// The store busy timeout as a duration.
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}
