//! Exit code constants for the dblease CLI.
//!
//! - 0: Success (or the wrapped command's own exit code)
//! - 1: User error (bad args, invalid config)
//! - 2: Lock store failure (database unreachable, SQL error)
//! - 3: Lock not claimed (held by another live owner, or the attempt failed closed)
//! - 4: The wrapped command could not be started

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Lock store failure: the database could not be opened or a query failed.
pub const STORE_FAILURE: i32 = 2;

/// The lease was not claimed, so the wrapped command did not run.
pub const NOT_CLAIMED: i32 = 3;

/// The wrapped command could not be spawned or was killed by a signal.
pub const COMMAND_FAILURE: i32 = 4;
