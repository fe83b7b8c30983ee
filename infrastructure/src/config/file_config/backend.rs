//! Backend configuration from TOML (`[backend]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Agent backend connection settings
///
/// # Example
///
/// ```toml
/// [backend]
/// base_url = "http://localhost:2024"
/// assistant_id = "agent"
/// request_timeout_seconds = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Root URL of the LangGraph server (no trailing slash needed)
    pub base_url: String,
    /// Graph to run (default: "agent")
    pub assistant_id: String,
    /// Timeout for the model and provider endpoints.
    /// The run stream itself is not bounded.
    pub request_timeout_seconds: u64,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:2024".to_string(),
            assistant_id: "agent".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl FileBackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// `base_url` without trailing slashes, ready for path joining
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}
