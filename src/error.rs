//! Error types for dblease.
//!
//! Uses thiserror for derive macros. Library operations return [`Result`];
//! the lease protocol itself never surfaces these to the caller of
//! `run_under_lock` and instead collapses them to "not claimed".

use crate::exit_codes;
use thiserror::Error;

/// Main error type for dblease operations.
#[derive(Error, Debug)]
pub enum LeaseError {
    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),

    /// The configuration file could not be read or failed validation.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A connection to the lock store could not be established.
    #[error("Lock store unavailable: {context}: {source}")]
    StoreUnavailable {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A query, write, or commit against the lock store failed.
    #[error("Lock store operation failed: {context}: {source}")]
    Store {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The requested lease cannot be represented as an expiry timestamp.
    #[error("Invalid lease duration: {0}")]
    InvalidLease(String),

    /// The command to run under the lock could not be executed.
    #[error("Command failed: {0}")]
    CommandError(String),
}

impl LeaseError {
    /// Wrap a store error raised while talking to an open connection.
    pub fn store(context: impl Into<String>, source: rusqlite::Error) -> Self {
        LeaseError::Store {
            context: context.into(),
            source,
        }
    }

    /// Wrap a store error raised while opening a connection.
    pub fn unavailable(context: impl Into<String>, source: rusqlite::Error) -> Self {
        LeaseError::StoreUnavailable {
            context: context.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LeaseError::UserError(_) => exit_codes::USER_ERROR,
            LeaseError::ConfigError(_) => exit_codes::USER_ERROR,
            LeaseError::InvalidLease(_) => exit_codes::USER_ERROR,
            LeaseError::StoreUnavailable { .. } => exit_codes::STORE_FAILURE,
            LeaseError::Store { .. } => exit_codes::STORE_FAILURE,
            LeaseError::CommandError(_) => exit_codes::COMMAND_FAILURE,
        }
    }
}

/// Result type alias for dblease operations.
pub type Result<T> = std::result::Result<T, LeaseError>;
