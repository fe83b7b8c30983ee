//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod agent_backend;
pub mod clipboard;
pub mod model_catalog;
pub mod transcript;
