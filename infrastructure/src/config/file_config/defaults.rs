//! Initial selections from TOML (`[defaults]` section)

use super::ConfigValidationError;
use scout_domain::Effort;
use serde::{Deserialize, Serialize};

/// # Example
///
/// ```toml
/// [defaults]
/// effort = "medium"
/// model = "models/gemini-2.5-flash"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDefaultsConfig {
    /// "low", "medium" or "high"
    pub effort: String,
    /// Preferred model; the first listed model is used when unset or unknown
    pub model: Option<String>,
}

impl Default for FileDefaultsConfig {
    fn default() -> Self {
        Self {
            effort: Effort::default().as_str().to_string(),
            model: None,
        }
    }
}

impl FileDefaultsConfig {
    pub fn parse_effort(&self) -> Result<Effort, ConfigValidationError> {
        self.effort
            .parse()
            .map_err(|_| ConfigValidationError::InvalidEffort(self.effort.clone()))
    }
}
