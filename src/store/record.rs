//! The persisted lock row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the lock table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    /// Name of the critical section (primary key).
    pub name: String,

    /// Identity token of the owner currently holding the lease.
    pub owner: String,

    /// Instant after which anyone may reclaim the lease.
    pub expiry: DateTime<Utc>,
}

impl LockRecord {
    /// Whether the lease lapsed strictly before `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry < now
    }

    /// Format the time left on the lease, or how long ago it lapsed.
    pub fn remaining_string(&self, now: DateTime<Utc>) -> String {
        let delta = self.expiry.signed_duration_since(now);
        let (secs, suffix) = if delta.num_seconds() < 0 {
            (-delta.num_seconds(), " ago")
        } else {
            (delta.num_seconds(), "")
        };

        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m{}", hours, minutes, suffix)
        } else if minutes > 0 {
            format!("{}m {}s{}", minutes, seconds, suffix)
        } else {
            format!("{}s{}", seconds, suffix)
        }
    }
}

impl std::fmt::Display for LockRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (owner: {}, expiry: {})",
            self.name,
            self.owner,
            self.expiry.format("%Y-%m-%d %H:%M:%S%.3f UTC")
        )
    }
}
