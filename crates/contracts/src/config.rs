//! BusConfig - Config Loader output
//!
//! Describes how a dispatcher is constructed and how the process reports on it.

use serde::{Deserialize, Serialize};

use crate::DispatchStrategy;

/// Complete configuration file model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Dispatcher construction options
    pub dispatcher: DispatcherConfig,

    /// Logging and metrics
    pub observability: ObservabilityConfig,
}

/// Options applied to a dispatcher before first use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Failure handling strategy (default: stop on first error)
    pub strategy: DispatchStrategy,
}

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log format
    pub log_format: LogFormat,
    /// Default log level, overridden by `RUST_LOG`
    pub log_level: String,
    /// Prometheus port (None = disabled)
    pub metrics_port: Option<u16>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            log_level: "info".to_string(),
            metrics_port: None,
        }
    }
}

/// Log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// JSON structured logs
    #[default]
    Json,
    /// Human-readable multi-line
    Pretty,
    /// Compact single line
    Compact,
}

/// Log levels accepted in `observability.log_level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
