//! Presentation layer for scout
//!
//! This crate contains the CLI definition and the terminal UI.

pub mod cli;
pub mod tui;

// Re-export commonly used types
pub use cli::commands::{Cli, EffortArg};
pub use tui::{TuiApp, TuiOptions};
