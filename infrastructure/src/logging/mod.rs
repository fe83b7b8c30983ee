//! Logging infrastructure: structured turn transcripts.
//!
//! Provides [`JsonlTranscriptLogger`], a JSONL file writer that implements
//! the [`TranscriptLogger`](scout_application::TranscriptLogger) port.

mod jsonl_transcript;

pub use jsonl_transcript::JsonlTranscriptLogger;
