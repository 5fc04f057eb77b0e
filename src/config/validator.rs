//! Configuration validator for vslaunch
//!
//! Validates configuration values to ensure they are within acceptable ranges.

use super::loader::{Config, ConfigError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_retry(&config.retry)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    /// Validates continue-retry settings
    fn validate_retry(retry: &super::loader::RetryConfig) -> Result<(), ConfigError> {
        if retry.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "Retry attempts must be at least 1".to_string(),
            ));
        }

        if retry.max_attempts > 100 {
            return Err(ConfigError::Invalid(
                "Retry attempts cannot exceed 100".to_string(),
            ));
        }

        if retry.delay_ms > 60_000 {
            return Err(ConfigError::Invalid(
                "Retry delay cannot exceed 60000 ms".to_string(),
            ));
        }

        Ok(())
    }

    /// Validates logging settings
    fn validate_logging(logging: &super::loader::LoggingConfig) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}
