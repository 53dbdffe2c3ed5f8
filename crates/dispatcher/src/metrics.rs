//! Per-dispatcher delivery counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a single dispatcher
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Synchronous emissions (async ones are counted here too once they run)
    emit_count: AtomicU64,
    /// Emissions handed off via `emit_async`
    async_emit_count: AtomicU64,
    /// Emissions that found no subscriber for their type
    unhandled_count: AtomicU64,
    /// Handler calls
    invocation_count: AtomicU64,
    /// Handler calls that returned an error
    failure_count: AtomicU64,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit_count(&self) -> u64 {
        self.emit_count.load(Ordering::Relaxed)
    }

    pub fn inc_emit_count(&self) {
        self.emit_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn async_emit_count(&self) -> u64 {
        self.async_emit_count.load(Ordering::Relaxed)
    }

    pub fn inc_async_emit_count(&self) {
        self.async_emit_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn unhandled_count(&self) -> u64 {
        self.unhandled_count.load(Ordering::Relaxed)
    }

    pub fn inc_unhandled_count(&self) {
        self.unhandled_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn invocation_count(&self) -> u64 {
        self.invocation_count.load(Ordering::Relaxed)
    }

    pub fn inc_invocation_count(&self) {
        self.invocation_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> DispatchMetricsSnapshot {
        DispatchMetricsSnapshot {
            emit_count: self.emit_count(),
            async_emit_count: self.async_emit_count(),
            unhandled_count: self.unhandled_count(),
            invocation_count: self.invocation_count(),
            failure_count: self.failure_count(),
        }
    }
}

/// Point-in-time copy of [`DispatchMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchMetricsSnapshot {
    pub emit_count: u64,
    pub async_emit_count: u64,
    pub unhandled_count: u64,
    pub invocation_count: u64,
    pub failure_count: u64,
}
