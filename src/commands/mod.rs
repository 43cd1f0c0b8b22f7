//! Command implementations for dblease.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each handler returns the process exit code.

mod init;
mod run;
mod status;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let Cli {
        config,
        database,
        command,
        ..
    } = cli;

    match command {
        Command::Init => init::cmd_init(config.as_deref(), database),
        Command::Run(args) => run::cmd_run(&load_config(config.as_deref(), database)?, args),
        Command::Status(args) => {
            status::cmd_status(&load_config(config.as_deref(), database)?, args)
        }
    }
}

/// Resolve the config file and apply the `--database` override.
fn load_config(path: Option<&Path>, database: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::resolve(path)?;
    if let Some(database) = database {
        config.database = database;
    }
    config.validate()?;
    Ok(config)
}
