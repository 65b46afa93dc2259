//! Binder counters

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters for one binder
#[derive(Debug, Default)]
pub struct BinderStats {
    input_events: AtomicU64,
    change_events: AtomicU64,
    sends: AtomicU64,
    suppressed: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of [`BinderStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub input_events: u64,
    pub change_events: u64,
    pub sends: u64,
    pub suppressed: u64,
    pub succeeded: u64,
    pub failed: u64,
}

impl StatsSnapshot {
    /// Sends that have not completed yet
    pub fn in_flight(&self) -> u64 {
        self.sends.saturating_sub(self.succeeded + self.failed)
    }
}

impl BinderStats {
    pub(crate) fn record_input(&self) {
        self.input_events.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_change(&self) {
        self.change_events.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_send(&self) {
        self.sends.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_suppressed(&self) {
        self.suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            input_events: self.input_events.load(Ordering::Relaxed),
            change_events: self.change_events.load(Ordering::Relaxed),
            sends: self.sends.load(Ordering::Relaxed),
            suppressed: self.suppressed.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
