//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// # Example
///
/// ```toml
/// [logging]
/// file = "~/.local/share/scout/scout.log"
/// transcript_dir = "~/.local/share/scout/transcripts"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Operation log file; defaults to `<data_dir>/scout/scout.log`
    pub file: Option<PathBuf>,
    /// Directory for JSONL transcripts; transcripts are off when unset
    pub transcript_dir: Option<PathBuf>,
}

impl FileLoggingConfig {
    /// Log file to use, falling back to the platform data directory
    pub fn resolved_file(&self) -> Option<PathBuf> {
        self.file
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("scout").join("scout.log")))
    }
}
