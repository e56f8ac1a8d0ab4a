//! Ledger time.
//!
//! Every timestamp the machines record comes from a [`Clock`] supplied by
//! the host. One clock is shared by all machines of a ledger so their
//! records agree on "now".

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::Timestamp;

/// Source of the current ledger time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// The current ledger time.
    fn now(&self) -> Timestamp;
}

/// A host-driven clock, typically tracking block height.
///
/// Time only moves when the host moves it.
#[derive(Debug, Default)]
pub struct ManualClock {
    height: AtomicU64,
}

impl ManualClock {
    /// Create a clock starting at `start`.
    pub fn new(start: u64) -> Self {
        Self {
            height: AtomicU64::new(start),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, at: u64) {
        self.height.store(at, Ordering::SeqCst);
    }

    /// Move forward by `by` units.
    pub fn advance(&self, by: u64) {
        self.height.fetch_add(by, Ordering::SeqCst);
    }

    /// Move forward by one unit and return the new time.
    pub fn tick(&self) -> Timestamp {
        Timestamp::new(self.height.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.height.load(Ordering::SeqCst))
    }
}

/// Wall-clock time in Unix milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(saturating_millis)
            .unwrap_or(0);
        Timestamp::new(millis)
    }
}

/// Whole milliseconds in `d`, pinned at `u64::MAX`.
fn saturating_millis(d: std::time::Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
