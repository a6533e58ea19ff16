//! Engine counters
//!
//! Cheap in-process counters over atomics, read out as a snapshot.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotone atomic counter
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    pub fn increment(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add(&self, delta: u64) {
        self.value.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Counters the engine maintains while it runs
#[derive(Debug, Default)]
pub struct EngineMetrics {
    pub orders_accepted: Counter,
    pub orders_cancelled: Counter,
    pub orders_expired: Counter,
    pub trades_executed: Counter,
    pub volume_filled: Counter,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            orders_accepted: self.orders_accepted.get(),
            orders_cancelled: self.orders_cancelled.get(),
            orders_expired: self.orders_expired.get(),
            trades_executed: self.trades_executed.get(),
            volume_filled: self.volume_filled.get(),
        }
    }
}

/// Point-in-time copy of the engine counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    pub orders_accepted: u64,
    pub orders_cancelled: u64,
    pub orders_expired: u64,
    pub trades_executed: u64,
    pub volume_filled: u64,
}
