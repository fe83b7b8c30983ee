//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Cannot submit an empty message")]
    EmptySubmission,

    #[error("Unknown effort level: {0} (expected low, medium or high)")]
    UnknownEffort(String),

    #[error("Unknown message role: {0}")]
    UnknownRole(String),
}

impl DomainError {
    /// Check if this error is a rejected blank submission
    pub fn is_empty_submission(&self) -> bool {
        matches!(self, DomainError::EmptySubmission)
    }
}
