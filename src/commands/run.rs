//! Implementation of the `dblease run` command.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::{LeaseError, Result};
use crate::exit_codes;
use crate::lease::{Acquisition, Coordinator};
use crate::store::{LockStore, SqliteStore};
use std::process::Command;
use std::time::Duration;

/// Execute the `dblease run` command.
///
/// Each invocation is its own owner, so a second `run` on the same name is
/// refused until the first one's lease lapses.
pub fn cmd_run(config: &Config, args: RunArgs) -> Result<i32> {
    let lease = match args.lease {
        Some(0) => {
            return Err(LeaseError::UserError(
                "--lease must be greater than 0 seconds".to_string(),
            ));
        }
        Some(seconds) => Duration::from_secs(seconds),
        None => config.default_lease(),
    };

    let coordinator = Coordinator::new(SqliteStore::open(config)?);
    run_with(&coordinator, &args, lease)
}

fn run_with<S: LockStore>(
    coordinator: &Coordinator<S>,
    args: &RunArgs,
    lease: Duration,
) -> Result<i32> {
    match coordinator.try_acquire(&args.name, lease) {
        Acquisition::Claimed(kind) => {
            tracing::info!(lock = %args.name, ?kind, "running command under lease");
            run_command(&args.command)
        }
        Acquisition::Contended { holder, expiry } => {
            if !args.quiet {
                eprintln!(
                    "Lock '{}' is held by {} until {}; not running.",
                    args.name,
                    holder,
                    expiry.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
            Ok(exit_codes::NOT_CLAIMED)
        }
        Acquisition::Failed(err) => {
            if !args.quiet {
                eprintln!("Could not claim lock '{}': {}; not running.", args.name, err);
            }
            Ok(exit_codes::NOT_CLAIMED)
        }
    }
}

/// Run `command` to completion and return its exit code.
fn run_command(command: &[String]) -> Result<i32> {
    let (program, rest) = command
        .split_first()
        .ok_or_else(|| LeaseError::UserError("no command given".to_string()))?;

    let status = Command::new(program)
        .args(rest)
        .status()
        .map_err(|e| LeaseError::CommandError(format!("failed to run '{}': {}", program, e)))?;

    // No code means the child was killed by a signal.
    Ok(status.code().unwrap_or(exit_codes::COMMAND_FAILURE))
}
