//! # Signal Bus CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - A runnable demo of sync and async emission
//! - Configuration validation and inspection

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_demo, run_info, run_validate};
use contracts::ObservabilityConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Signal bus CLI starting");

    let result = match &cli.command {
        Commands::Run(args) => run_demo(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let config = ObservabilityConfig {
        log_format: cli.log_format.into(),
        log_level: log_level.to_string(),
        metrics_port: None,
    };

    observability::init_with_config(&config)
}
