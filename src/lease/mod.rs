//! Lease-based locking for dblease.
//!
//! A [`Coordinator`] grants a named lease to the calling process by running a
//! single decision transaction against the lock store:
//!
//! 1. Read the row for the lock name under an exclusive lock.
//! 2. No row: insert one owned by this coordinator.
//! 3. Row owned by this coordinator: renew the expiry (reentrant).
//! 4. Row whose expiry lapsed: take it over.
//! 5. Row held by another live owner: write nothing.
//!
//! Steps 2 to 4 claim the lease and the caller's work runs after the commit.
//! Any store error rolls the transaction back and the attempt fails closed.
//!
//! # Leases, not handles
//!
//! There is no unlock. A claimed lease stays with its owner until the expiry
//! passes, even after the work has finished.

mod clock;
mod coordinator;
mod decision;
mod identity;


// Re-export public API
pub use clock::{Clock, SystemClock};
pub use coordinator::{Acquisition, Coordinator};
pub use decision::{ClaimKind, Decision, decide};
pub use identity::OwnerId;
