//! Dispatch statistics for registry monitoring

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time statistics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStats {
    /// Emit calls that found a listener sequence
    pub events_emitted: u64,
    /// Listener invocations that returned successfully
    pub listeners_invoked: u64,
    /// Listener invocations that returned an error
    pub listener_failures: u64,
    /// Listeners currently registered across all events
    pub total_listeners: usize,
}

#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    events_emitted: AtomicU64,
    listeners_invoked: AtomicU64,
    listener_failures: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record_emit(&self) {
        self.events_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_invocation(&self) {
        self.listeners_invoked.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.listener_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, total_listeners: usize) -> EventStats {
        EventStats {
            events_emitted: self.events_emitted.load(Ordering::Relaxed),
            listeners_invoked: self.listeners_invoked.load(Ordering::Relaxed),
            listener_failures: self.listener_failures.load(Ordering::Relaxed),
            total_listeners,
        }
    }
}
