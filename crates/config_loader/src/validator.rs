//! Configuration validation
//!
//! Rules:
//! - observability.log_level is a known level
//! - observability.metrics_port, if set, is non-zero

use contracts::{BusConfig, ContractError, LOG_LEVELS};

/// Validate a parsed BusConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &BusConfig) -> Result<(), ContractError> {
    validate_log_level(config)?;
    validate_metrics_port(config)?;
    Ok(())
}

fn validate_log_level(config: &BusConfig) -> Result<(), ContractError> {
    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ContractError::config_validation(
            "observability.log_level",
            format!(
                "unknown log level '{}', expected one of {:?}",
                config.observability.log_level, LOG_LEVELS
            ),
        ));
    }
    Ok(())
}

fn validate_metrics_port(config: &BusConfig) -> Result<(), ContractError> {
    if config.observability.metrics_port == Some(0) {
        return Err(ContractError::config_validation(
            "observability.metrics_port",
            "metrics_port must be > 0, omit it to disable metrics",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate(&BusConfig::default()).is_ok());
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut config = BusConfig::default();
        config.observability.log_level = "WARN".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_unknown_log_level() {
        let mut config = BusConfig::default();
        config.observability.log_level = "verbose".to_string();
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ContractError::ConfigValidation { ref field, .. } if field == "observability.log_level"));
    }

    #[test]
    fn test_zero_metrics_port() {
        let mut config = BusConfig::default();
        config.observability.metrics_port = Some(0);
        assert!(validate(&config).is_err());
    }
}
