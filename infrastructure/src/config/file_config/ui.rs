//! TUI configuration from TOML (`[ui]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// # Example
///
/// ```toml
/// [ui]
/// reveal_delay_ms = 10
/// copied_feedback_ms = 2000
/// tick_ms = 250
/// max_input_height = 8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUiConfig {
    /// Delay between revealed characters of an answer
    pub reveal_delay_ms: u64,
    /// How long the "Copied" badge stays visible
    pub copied_feedback_ms: u64,
    /// Housekeeping tick (flash expiry, spinner)
    pub tick_ms: u64,
    /// Maximum height of the input area in lines
    pub max_input_height: u16,
}

impl Default for FileUiConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 10,
            copied_feedback_ms: 2000,
            tick_ms: 250,
            max_input_height: 8,
        }
    }
}

impl FileUiConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn copied_feedback(&self) -> Duration {
        Duration::from_millis(self.copied_feedback_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
