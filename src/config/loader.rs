//! Configuration loader for vslaunch
//!
//! Handles loading configuration from TOML files and merging with defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::defaults::default_config;
use crate::attach::RetryPolicy;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_retry")]
    pub retry: RetryConfig,

    #[serde(default = "default_attach")]
    pub attach: AttachConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

/// Continue-retry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

/// Attach behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachConfig {
    #[serde(default = "default_continue_after_attach")]
    pub continue_after_attach: bool,
    #[serde(default = "default_reveal_output_pane")]
    pub reveal_output_pane: bool,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Config {
    /// The retry policy described by this configuration
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.delay_ms),
        )
    }
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration or returns defaults if the file doesn't exist
    pub fn load_or_default(&self) -> Result<Config, ConfigError> {
        match self.load() {
            Err(ConfigError::FileNotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }
}

/// Loads configuration from the default location
///
/// The path comes from `VSLAUNCH_CONFIG` when set, otherwise
/// `vslaunch.toml` in the working directory; a missing file yields the
/// defaults, a malformed one is an error.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = std::env::var_os("VSLAUNCH_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("vslaunch.toml"));
    ConfigLoader::new(path).load_or_default()
}

// Default functions for serde
fn default_retry() -> RetryConfig {
    let defaults = default_config();
    RetryConfig {
        max_attempts: defaults.retry.max_attempts,
        delay_ms: defaults.retry.delay_ms,
    }
}

fn default_attach() -> AttachConfig {
    let defaults = default_config();
    AttachConfig {
        continue_after_attach: defaults.attach.continue_after_attach,
        reveal_output_pane: defaults.attach.reveal_output_pane,
    }
}

fn default_logging() -> LoggingConfig {
    let defaults = default_config();
    LoggingConfig {
        level: defaults.logging.level,
    }
}

// Individual field defaults
fn default_max_attempts() -> u32 {
    default_config().retry.max_attempts
}

fn default_delay_ms() -> u64 {
    default_config().retry.delay_ms
}

fn default_continue_after_attach() -> bool {
    default_config().attach.continue_after_attach
}

fn default_reveal_output_pane() -> bool {
    default_config().attach.reveal_output_pane
}

fn default_log_level() -> String {
    default_config().logging.level
}

impl Default for Config {
    fn default() -> Self {
        Config {
            retry: default_retry(),
            attach: default_attach(),
            logging: default_logging(),
        }
    }
}
