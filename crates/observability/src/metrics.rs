//! Global emission metrics
//!
//! Recorded through the `metrics` facade; a no-op until a recorder such as the
//! Prometheus exporter is installed.

use metrics::counter;

/// How an emission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitStatus {
    /// Every handler succeeded
    Delivered,
    /// At least one handler failed
    Failed,
    /// No handler registered for the payload type
    Unhandled,
}

impl EmitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::Unhandled => "unhandled",
        }
    }
}

/// Record one emission for `event` (payload type name)
pub fn record_emit(event: &'static str, status: EmitStatus) {
    counter!(
        "signal_bus_emits_total",
        "event" => event,
        "status" => status.as_str()
    )
    .increment(1);
}

/// Record a failing handler call
pub fn record_handler_failure(event: &'static str) {
    counter!("signal_bus_handler_failures_total", "event" => event).increment(1);
}

/// Record a new subscription
pub fn record_subscription(event: &'static str) {
    counter!("signal_bus_subscriptions_total", "event" => event).increment(1);
}
