//! Infrastructure layer for scout
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod backend;
pub mod clipboard;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use backend::{HttpModelCatalog, LangGraphBackend};
pub use clipboard::ArboardClipboard;
pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendConfig, FileConfig, FileDefaultsConfig,
    FileLoggingConfig, FileUiConfig,
};
pub use logging::JsonlTranscriptLogger;
