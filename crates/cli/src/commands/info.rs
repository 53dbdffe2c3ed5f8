//! `info` command implementation.

use anyhow::Result;
use tracing::info;

use config_loader::{ConfigFormat, ConfigLoader};
use contracts::BusConfig;

use super::load_config;
use crate::cli::InfoArgs;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    if let Some(ref path) = args.config {
        info!(config = %path.display(), "Loading configuration");
    }

    let config = load_config(args.config.as_deref())?;
    println!("{}", render(&config, args.json)?);
    Ok(())
}

/// Render the effective configuration as TOML or JSON
fn render(config: &BusConfig, json: bool) -> Result<String> {
    let format = if json {
        ConfigFormat::Json
    } else {
        ConfigFormat::Toml
    };
    Ok(ConfigLoader::render(config, format)?)
}
