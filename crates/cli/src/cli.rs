//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Signal Bus - typed in-process publish/subscribe
#[derive(Parser, Debug)]
#[command(
    name = "signal-bus",
    author,
    version,
    about = "Typed in-process publish/subscribe dispatcher",
    long_about = "Demonstrates and inspects the typed signal bus.\n\n\
                  Handlers subscribe to a payload type with a priority; emitted \n\
                  values are delivered synchronously or on a background thread."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SIGNAL_BUS_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "SIGNAL_BUS_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the sync + async emission demo
    Run(RunArgs),

    /// Validate configuration file
    Validate(ValidateArgs),

    /// Display the effective configuration
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON); defaults apply when omitted
    #[arg(short, long, env = "SIGNAL_BUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the dispatch strategy from configuration
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Number of always-failing low priority handlers to register
    #[arg(long, default_value = "0")]
    pub failing_handlers: u8,

    /// Simulated work of the background listener, in milliseconds
    #[arg(long, default_value = "100")]
    pub work_ms: u64,

    /// Seconds to wait for the async emission before giving up
    #[arg(long, default_value = "5")]
    pub timeout: u64,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "SIGNAL_BUS_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "signal-bus.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file; defaults are shown when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output as JSON instead of TOML
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for contracts::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

/// Dispatch strategy as accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StrategyArg {
    /// Stop at the first failing handler
    FailFast,
    /// Run every handler and join the errors
    BestEffort,
}

impl From<StrategyArg> for contracts::DispatchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::FailFast => Self::StopOnFirstError,
            StrategyArg::BestEffort => Self::BestEffort,
        }
    }
}
