//! Port for structured transcript logging.
//!
//! Records each settled turn (question, answer, recorded steps) to a
//! machine-readable log. This is separate from `tracing`-based operation
//! logs, which carry human-readable diagnostics.

use serde_json::Value;

/// A structured transcript record
pub struct TranscriptEntry {
    /// Record type, e.g. `"turn_settled"` or `"conversation_reset"`
    pub entry_type: &'static str,
    pub payload: Value,
}

impl TranscriptEntry {
    pub fn new(entry_type: &'static str, payload: Value) -> Self {
        Self {
            entry_type,
            payload,
        }
    }
}

/// Implementations write each entry as a single record (e.g. one JSONL line).
/// Logging is synchronous and infallible from the caller's point of view.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, entry: TranscriptEntry);
}

/// No-op implementation for tests and when transcripts are disabled.
pub struct NoTranscript;

impl TranscriptLogger for NoTranscript {
    fn log(&self, _entry: TranscriptEntry) {}
}
