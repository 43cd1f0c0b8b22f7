//! The lock coordinator: runs the decision transaction and the caller's work.

use super::clock::{Clock, SystemClock};
use super::decision::{ClaimKind, Decision, decide};
use super::identity::OwnerId;
use crate::error::LeaseError;
use crate::store::LockStore;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Result of one acquisition attempt.
#[derive(Debug)]
pub enum Acquisition {
    /// The lease is ours until the written expiry.
    Claimed(ClaimKind),
    /// Another owner holds a live lease.
    Contended {
        holder: String,
        expiry: DateTime<Utc>,
    },
    /// The decision transaction failed and was rolled back.
    Failed(LeaseError),
}

impl Acquisition {
    /// Whether the caller may run its work.
    pub fn is_claimed(&self) -> bool {
        matches!(self, Acquisition::Claimed(_))
    }
}

/// Grants named leases to this process through a shared lock store.
///
/// Each coordinator owns one identity token, generated at construction and
/// reused for every attempt. Two coordinators never share in-memory state;
/// they only meet through the store.
#[derive(Debug)]
pub struct Coordinator<S, C = SystemClock> {
    store: S,
    clock: C,
    owner: OwnerId,
}

impl<S: LockStore> Coordinator<S> {
    /// Create a coordinator with a fresh identity and the system clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: LockStore, C: Clock> Coordinator<S, C> {
    /// Create a coordinator with a fresh identity and the given clock.
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            owner: OwnerId::generate(),
        }
    }

    /// The identity written to rows this coordinator claims.
    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Make one non-blocking attempt to claim `name` for `lease`.
    ///
    /// Only waits for the store's row lock while another transaction is
    /// deciding the same name. Errors never escape: they are logged and
    /// reported as [`Acquisition::Failed`].
    pub fn try_acquire(&self, name: &str, lease: Duration) -> Acquisition {
        let outcome = self.store.transact(|tx| {
            let current = tx.select_for_update(name)?;

            // Read once, after the row lock is held, for both the staleness
            // check and the new expiry.
            let now = self.clock.now();
            let decision = decide(name, now, &self.owner, lease, current.as_ref())?;

            match &decision {
                Decision::Claim {
                    kind: ClaimKind::Created,
                    record,
                } => tx.insert(record)?,
                Decision::Claim { record, .. } => tx.update(record)?,
                Decision::Contended { .. } => {}
            }

            Ok(decision)
        });

        match outcome {
            Ok(Decision::Claim { kind, record }) => {
                tracing::debug!(
                    lock = name,
                    owner = %self.owner,
                    expiry = %record.expiry,
                    ?kind,
                    "lease claimed"
                );
                Acquisition::Claimed(kind)
            }
            Ok(Decision::Contended { holder, expiry }) => {
                tracing::debug!(lock = name, %holder, %expiry, "lease held by another owner");
                Acquisition::Contended { holder, expiry }
            }
            Err(err) => {
                tracing::warn!(lock = name, error = %err, "lease attempt failed; not claimed");
                Acquisition::Failed(err)
            }
        }
    }

    /// Run `work` if the lease on `name` is claimed, returning its result.
    ///
    /// The store connection is released before `work` starts. The lease is
    /// not given up when `work` returns.
    pub fn try_run_under_lock<T, F>(&self, name: &str, lease: Duration, work: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        if self.try_acquire(name, lease).is_claimed() {
            Some(work())
        } else {
            None
        }
    }

    /// Run `work` if the lease on `name` is claimed.
    ///
    /// Callers only observe whether `work` ran through its side effects;
    /// callers that need it to run eventually must retry themselves.
    pub fn run_under_lock<F>(&self, name: &str, lease: Duration, work: F)
    where
        F: FnOnce(),
    {
        let _ = self.try_run_under_lock(name, lease, work);
    }
}
