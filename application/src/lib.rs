//! Application layer for scout
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    agent_backend::{AgentBackend, BackendError, TurnStream},
    clipboard::{ClipboardError, ClipboardPort},
    model_catalog::{CatalogError, ModelCatalog},
    transcript::{NoTranscript, TranscriptEntry, TranscriptLogger},
};
pub use use_cases::copy_response::CopyResponseUseCase;
pub use use_cases::load_models::{LoadModelsUseCase, ModelsLoaded};
pub use use_cases::submit_turn::{PreparedTurn, SubmitTurnError, SubmitTurnUseCase};
