//! Time sources.
//!
//! CastVote checks the voting window against a [`Clock`] injected into the
//! ledger, so tests and deterministic harnesses can pin time while
//! production uses the system clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current Unix time in seconds.
pub trait Clock: Send + Sync {
    /// Current Unix timestamp, seconds.
    fn unix_now(&self) -> i64;
}

/// Wall-clock time from [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_now(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_secs() as i64,
            // Clock set before the epoch: report negative seconds rather
            // than panicking.
            Err(err) => -(err.duration().as_secs() as i64),
        }
    }
}

/// A settable clock for tests and replay.
///
/// Clones share the same instant, so a harness can keep one handle and
/// advance time while a ledger owns the other.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    /// A clock pinned at `now`.
    #[must_use]
    pub fn new(now: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(now)),
        }
    }

    /// Pin the clock to `now`.
    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Move the clock forward (or backward) by `delta` seconds.
    pub fn advance(&self, delta: i64) {
        self.now.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn unix_now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_the_instant() {
        let clock = ManualClock::new(100);
        let handle = clock.clone();
        handle.advance(50);
        assert_eq!(clock.unix_now(), 150);
        handle.set(-10);
        assert_eq!(clock.unix_now(), -10);
    }

    #[test]
    fn system_clock_is_past_2020() {
        // 2020-01-01T00:00:00Z; anything earlier means the host clock is
        // broken badly enough that window checks are meaningless anyway.
        assert!(SystemClock.unix_now() > 1_577_836_800);
    }
}
