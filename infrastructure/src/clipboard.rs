//! System clipboard adapter backed by `arboard`

use scout_application::ports::clipboard::{ClipboardError, ClipboardPort};
use std::sync::Mutex;
use tracing::debug;

/// Lazily opens the system clipboard on first write and keeps the handle, so
/// on X11 the copied text stays available while the app runs.
#[derive(Default)]
pub struct ArboardClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardPort for ArboardClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self
            .handle
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".into()))?;

        if guard.is_none() {
            debug!("Opening system clipboard");
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            *guard = Some(clipboard);
        }

        match guard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| ClipboardError::WriteFailed(e.to_string())),
            None => Err(ClipboardError::Unavailable("clipboard not open".into())),
        }
    }
}
