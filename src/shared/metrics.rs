use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const UNSET_TS: u64 = 0;

/// Settlement counters for one controller.
#[derive(Debug)]
pub struct MutationMetrics {
    confirmed: AtomicU64,
    rolled_back: AtomicU64,
    rejected_in_flight: AtomicU64,
    last_confirmed_ms: AtomicU64,
    last_rolled_back_ms: AtomicU64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MutationMetricsSnapshot {
    pub confirmed: u64,
    pub rolled_back: u64,
    pub rejected_in_flight: u64,
    pub last_confirmed_ms: Option<u64>,
    pub last_rolled_back_ms: Option<u64>,
}

impl MutationMetrics {
    pub const fn new() -> Self {
        Self {
            confirmed: AtomicU64::new(0),
            rolled_back: AtomicU64::new(0),
            rejected_in_flight: AtomicU64::new(0),
            last_confirmed_ms: AtomicU64::new(UNSET_TS),
            last_rolled_back_ms: AtomicU64::new(UNSET_TS),
        }
    }

    pub fn record_confirmed(&self) {
        self.confirmed.fetch_add(1, Ordering::Relaxed);
        self.last_confirmed_ms
            .store(current_unix_ms(), Ordering::Relaxed);
    }

    pub fn record_rolled_back(&self) {
        self.rolled_back.fetch_add(1, Ordering::Relaxed);
        self.last_rolled_back_ms
            .store(current_unix_ms(), Ordering::Relaxed);
    }

    pub fn record_rejected_in_flight(&self) {
        self.rejected_in_flight.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MutationMetricsSnapshot {
        MutationMetricsSnapshot {
            confirmed: self.confirmed.load(Ordering::Relaxed),
            rolled_back: self.rolled_back.load(Ordering::Relaxed),
            rejected_in_flight: self.rejected_in_flight.load(Ordering::Relaxed),
            last_confirmed_ms: timestamp_to_option(self.last_confirmed_ms.load(Ordering::Relaxed)),
            last_rolled_back_ms: timestamp_to_option(
                self.last_rolled_back_ms.load(Ordering::Relaxed),
            ),
        }
    }

}

impl Default for MutationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
pub fn current_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or(UNSET_TS)
}

#[inline]
pub fn timestamp_to_option(value: u64) -> Option<u64> {
    if value == UNSET_TS { None } else { Some(value) }
}
