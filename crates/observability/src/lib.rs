//! # Observability
//!
//! Tracing and Prometheus setup for processes embedding the signal bus.
//!
//! ## Features
//!
//! - Tracing initialisation (JSON / Pretty / Compact), honours `RUST_LOG`
//! - Optional Prometheus exporter
//! - Global emission counters recorded by the dispatcher
//!
//! ## Example
//!
//! ```ignore
//! use contracts::ObservabilityConfig;
//!
//! observability::init_with_config(&ObservabilityConfig::default())?;
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use contracts::{LogFormat, ObservabilityConfig};

pub use crate::metrics::{record_emit, record_handler_failure, record_subscription, EmitStatus};

/// Initialise with defaults: JSON logs at `info`, no metrics endpoint
pub fn init() -> Result<()> {
    init_with_config(&ObservabilityConfig::default())
}

/// Initialise tracing and, if a port is configured, the Prometheus exporter
pub fn init_with_config(config: &ObservabilityConfig) -> Result<()> {
    // 1. Tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
        LogFormat::Compact => fmt::layer().compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    // 2. Prometheus exporter (if enabled)
    if let Some(port) = config.metrics_port {
        init_metrics_only(port)?;
    }

    tracing::info!(
        log_format = ?config.log_format,
        metrics_port = ?config.metrics_port,
        "Observability initialized"
    );

    Ok(())
}

/// Install only the Prometheus recorder
///
/// For processes whose tracing is set up elsewhere.
pub fn init_metrics_only(port: u16) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .context("Failed to install Prometheus recorder")?;

    tracing::info!(port = port, "Prometheus metrics endpoint initialized");
    Ok(())
}
