//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Produce a `BusConfig`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("signal-bus.toml")).unwrap();
//! println!("Strategy: {}", config.dispatcher.strategy);
//! ```

mod parser;
mod validator;

pub use contracts::BusConfig;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;

/// Loads a [`BusConfig`] from disk or memory and validates it.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read `path`, picking TOML or JSON by extension.
    ///
    /// # Errors
    /// Unknown extension, IO failure, parse or validation failure.
    pub fn load_from_path(path: &Path) -> Result<BusConfig, ContractError> {
        let format = ConfigFormat::from_path(path)?;
        Self::load_from_str(&std::fs::read_to_string(path)?, format)
    }

    /// Parse `content` in `format`, then validate.
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<BusConfig, ContractError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }

    /// Render the effective configuration in `format`.
    pub fn render(config: &BusConfig, format: ConfigFormat) -> Result<String, ContractError> {
        match format {
            ConfigFormat::Toml => toml::to_string_pretty(config)
                .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}"))),
            ConfigFormat::Json => serde_json::to_string_pretty(config)
                .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}"))),
        }
    }
}
