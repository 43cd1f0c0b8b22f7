//! The lease decision, free of any I/O.

use super::identity::OwnerId;
use crate::error::{LeaseError, Result};
use crate::store::LockRecord;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// How a lease was claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimKind {
    /// No row existed; a new one was inserted.
    Created,
    /// The caller already owned the row and extended it.
    Renewed,
    /// Another owner's lease had lapsed and was overwritten.
    TakenOver { previous_owner: String },
}

/// Outcome of evaluating one lock row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The caller gets the lease; `record` is the row to write.
    Claim { kind: ClaimKind, record: LockRecord },
    /// Another owner holds a live lease; nothing is written.
    Contended {
        holder: String,
        expiry: DateTime<Utc>,
    },
}

impl Decision {
    /// Whether the caller gets the lease.
    pub fn is_claim(&self) -> bool {
        matches!(self, Decision::Claim { .. })
    }
}

/// Decide whether `owner` may take the lease on `name` at `now`.
///
/// `current` is the row read under lock, if any. A renewal never moves the
/// expiry backwards, so renewing with a shorter lease keeps the later expiry.
pub fn decide(
    name: &str,
    now: DateTime<Utc>,
    owner: &OwnerId,
    lease: Duration,
    current: Option<&LockRecord>,
) -> Result<Decision> {
    let expiry = lease_expiry(now, lease)?;
    let claim = |kind, expiry| Decision::Claim {
        kind,
        record: LockRecord {
            name: name.to_string(),
            owner: owner.as_str().to_string(),
            expiry,
        },
    };

    let decision = match current {
        None => claim(ClaimKind::Created, expiry),
        Some(existing) if existing.owner == owner.as_str() => {
            claim(ClaimKind::Renewed, expiry.max(existing.expiry))
        }
        Some(existing) if existing.is_expired(now) => claim(
            ClaimKind::TakenOver {
                previous_owner: existing.owner.clone(),
            },
            expiry,
        ),
        Some(existing) => Decision::Contended {
            holder: existing.owner.clone(),
            expiry: existing.expiry,
        },
    };

    Ok(decision)
}

fn lease_expiry(now: DateTime<Utc>, lease: Duration) -> Result<DateTime<Utc>> {
    chrono::Duration::from_std(lease)
        .ok()
        .and_then(|lease| now.checked_add_signed(lease))
        .ok_or_else(|| {
            LeaseError::InvalidLease(format!(
                "a lease of {:?} starting at {} cannot be represented",
                lease, now
            ))
        })
}
