//! Copy an AI response to the system clipboard.

use crate::ports::clipboard::ClipboardPort;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct CopyResponseUseCase {
    clipboard: Arc<dyn ClipboardPort>,
}

impl CopyResponseUseCase {
    pub fn new(clipboard: Arc<dyn ClipboardPort>) -> Self {
        Self { clipboard }
    }

    /// Returns whether the text reached the clipboard.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn execute(&self, text: &str) -> bool {
        match self.clipboard.write_text(text) {
            Ok(()) => {
                debug!("Copied {} chars to clipboard", text.chars().count());
                true
            }
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clipboard::ClipboardError;
    use std::sync::Mutex;

    struct MemoryClipboard {
        contents: Mutex<Option<String>>,
        deny: bool,
    }

    impl ClipboardPort for MemoryClipboard {
        fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.deny {
                return Err(ClipboardError::WriteFailed("denied".into()));
            }
            *self.contents.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_copy_writes_full_text() {
        let clipboard = Arc::new(MemoryClipboard {
            contents: Mutex::new(None),
            deny: false,
        });
        let use_case = CopyResponseUseCase::new(clipboard.clone());
        assert!(use_case.execute("The answer is 4."));
        assert_eq!(
            clipboard.contents.lock().unwrap().as_deref(),
            Some("The answer is 4.")
        );
    }

    #[test]
    fn test_denied_write_reports_false() {
        let clipboard = Arc::new(MemoryClipboard {
            contents: Mutex::new(None),
            deny: true,
        });
        assert!(!CopyResponseUseCase::new(clipboard).execute("x"));
    }
}
