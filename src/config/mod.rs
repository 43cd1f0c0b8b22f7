//! Configuration model for dblease.
//!
//! This module defines the Config struct that represents `dblease.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for every field, and validation of config values.

mod model;
pub(crate) mod operations;


// Re-export public API
pub use model::{Config, DATABASE_ENV_VAR, DEFAULT_CONFIG_FILE};
