//! System clipboard adapter using `arboard`.
//!
//! The handle is created lazily on first copy and then kept alive: on X11
//! the selection is only served while its owner exists, so dropping the
//! handle right after `set_text` would lose the copied text.

use std::sync::Mutex;

use crate::error::ClipboardError;
use crate::traits::ClipboardSink;

#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn convert_error(err: arboard::Error) -> ClipboardError {
        match err {
            arboard::Error::ClipboardNotSupported => ClipboardError::Unsupported,
            arboard::Error::ClipboardOccupied => {
                ClipboardError::Unavailable("clipboard is busy".to_string())
            }
            other => ClipboardError::Copy(other.to_string()),
        }
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self
            .handle
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".to_string()))?;

        if guard.is_none() {
            *guard = Some(arboard::Clipboard::new().map_err(Self::convert_error)?);
        }
        let clipboard = guard
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("no clipboard handle".to_string()))?;

        clipboard
            .set_text(text.to_string())
            .map_err(Self::convert_error)
    }
}
