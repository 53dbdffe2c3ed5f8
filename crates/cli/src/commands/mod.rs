//! Command implementations.

mod info;
mod run;
mod validate;

pub use info::run_info;
pub use run::run_demo;
pub use validate::run_validate;

use anyhow::{Context, Result};
use std::path::Path;

use contracts::BusConfig;

/// Load configuration from `path`, or defaults when no path is given
fn load_config(path: Option<&Path>) -> Result<BusConfig> {
    match path {
        Some(path) => config_loader::ConfigLoader::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(BusConfig::default()),
    }
}
