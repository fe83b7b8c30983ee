//! Configuration file loading for scout
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SCOUT_` environment variables (`SCOUT_BACKEND__BASE_URL=...`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./scout.toml` or `./.scout.toml`
//! 4. Global: `$XDG_CONFIG_HOME/scout/config.toml` (or the platform equivalent)
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBackendConfig, FileConfig, FileDefaultsConfig, FileLoggingConfig,
    FileUiConfig,
};
pub use loader::ConfigLoader;
