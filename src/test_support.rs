use crate::lease::Clock;
use crate::store::SqliteStore;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use tempfile::TempDir;

/// Create a throwaway SQLite database with the lock table in place.
pub(crate) fn create_test_store() -> (TempDir, SqliteStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = SqliteStore::new(temp_dir.path().join("locks.sqlite3"), "dist_lock").unwrap();
    store.create_schema().unwrap();
    (temp_dir, store)
}

/// A fixed instant for tests that do not care about the wall clock.
pub(crate) fn instant(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, min, sec).unwrap()
}

fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poison| poison.into_inner())
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so several coordinators can observe one
/// simulated timeline.
#[derive(Debug, Clone)]
pub(crate) struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub(crate) fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        *lock_ignoring_poison(&self.now) += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *lock_ignoring_poison(&self.now)
    }
}

/// A clock that moves forward by `step` every time it is read.
#[derive(Debug)]
pub(crate) struct TickingClock {
    next: Mutex<DateTime<Utc>>,
    step: Duration,
    reads: Mutex<usize>,
}

impl TickingClock {
    pub(crate) fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
            reads: Mutex::new(0),
        }
    }

    /// How many times `now` has been called.
    pub(crate) fn reads(&self) -> usize {
        *lock_ignoring_poison(&self.reads)
    }
}

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        *lock_ignoring_poison(&self.reads) += 1;
        let mut next = lock_ignoring_poison(&self.next);
        let now = *next;
        *next += self.step;
        now
    }
}

impl Clock for &TickingClock {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
