//! Default configuration values for vslaunch

use serde::{Deserialize, Serialize};

/// Default configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDefaults {
    pub retry: RetryDefaults,
    pub attach: AttachDefaults,
    pub logging: LoggingDefaults,
}

/// Default continue-retry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryDefaults {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

/// Default attach behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachDefaults {
    pub continue_after_attach: bool,
    pub reveal_output_pane: bool,
}

/// Default logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingDefaults {
    pub level: String,
}

/// Returns the default configuration
pub fn default_config() -> ConfigDefaults {
    ConfigDefaults {
        retry: RetryDefaults {
            max_attempts: 5,
            delay_ms: 1000,
        },
        attach: AttachDefaults {
            continue_after_attach: true,
            reveal_output_pane: true,
        },
        logging: LoggingDefaults {
            level: "info".to_string(),
        },
    }
}
