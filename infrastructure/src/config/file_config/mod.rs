//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section uses `#[serde(default)]`, so a partial file is always valid.

mod backend;
mod defaults;
mod logging;
mod ui;

pub use backend::FileBackendConfig;
pub use defaults::FileDefaultsConfig;
pub use logging::FileLoggingConfig;
pub use ui::FileUiConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Agent backend connection
    pub backend: FileBackendConfig,
    /// Terminal UI timings and sizes
    pub ui: FileUiConfig,
    /// Initial effort and model selection
    pub defaults: FileDefaultsConfig,
    /// Log file and transcript locations
    pub logging: FileLoggingConfig,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("backend.base_url must not be empty")]
    EmptyBaseUrl,

    #[error("backend.base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("defaults.effort: unknown value '{0}' (expected low, medium or high)")]
    InvalidEffort(String),
}

impl FileConfig {
    /// Validate the entire configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let url = self.backend.base_url.trim();
        if url.is_empty() {
            errors.push(ConfigValidationError::EmptyBaseUrl);
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigValidationError::InvalidBaseUrl(url.to_string()));
        }

        let positive = [
            (
                "backend.request_timeout_seconds",
                self.backend.request_timeout_seconds,
            ),
            ("ui.reveal_delay_ms", self.ui.reveal_delay_ms),
            ("ui.copied_feedback_ms", self.ui.copied_feedback_ms),
            ("ui.tick_ms", self.ui.tick_ms),
            ("ui.max_input_height", u64::from(self.ui.max_input_height)),
        ];
        for (field, value) in positive {
            if value == 0 {
                errors.push(ConfigValidationError::Zero(field));
            }
        }

        if let Err(e) = self.defaults.parse_effort() {
            errors.push(e);
        }

        errors
    }
}
