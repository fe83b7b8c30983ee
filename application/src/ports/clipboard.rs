//! Clipboard port

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write denied: {0}")]
    WriteFailed(String),
}

/// System clipboard access.
///
/// Writing may fail (no display server, permission denied); callers treat
/// failure as a silent no-op.
pub trait ClipboardPort: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
