//! CLI argument parsing for dblease.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// dblease: run a command under a named lease stored in a shared database.
///
/// Every process pointed at the same database competes for the same leases:
/// - A lease is claimed by inserting or overwriting a row in the lock table
/// - A live lease held by someone else makes `run` skip the command
/// - Leases are never released early; they lapse at their expiry
#[derive(Parser, Debug)]
#[command(name = "dblease")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: ./dblease.yaml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database file, overriding the config and DBLEASE_DATABASE.
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Log more (-v for debug, -vv for trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for dblease.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the lock table and a default config file.
    ///
    /// Idempotent: an existing config file and table are left untouched.
    Init,

    /// Run a command if the named lease can be claimed.
    ///
    /// Makes one attempt. When the lease is claimed the command runs and
    /// dblease exits with its exit code; otherwise it exits with code 3.
    Run(RunArgs),

    /// List lock records with their owners and expiry.
    Status(StatusArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Name of the lock guarding the command.
    #[arg(short, long)]
    pub name: String,

    /// Lease length in seconds (default: `default_lease_seconds` from config).
    #[arg(short, long, value_name = "SECONDS")]
    pub lease: Option<u64>,

    /// Do not print a note when the lease is held elsewhere.
    #[arg(short, long)]
    pub quiet: bool,

    /// Command and arguments to run, after `--`.
    #[arg(last = true, required = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Arguments for the `status` command.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Print records as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
