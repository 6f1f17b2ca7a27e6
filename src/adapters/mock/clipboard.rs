//! Recording clipboard for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::ClipboardError;
use crate::traits::ClipboardSink;

#[derive(Debug, Clone, Default)]
pub struct MockClipboard {
    copies: Arc<Mutex<Vec<String>>>,
    unsupported: Arc<AtomicBool>,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every copy fail as if the platform had no clipboard.
    pub fn unsupported() -> Self {
        let clipboard = Self::default();
        clipboard.unsupported.store(true, Ordering::SeqCst);
        clipboard
    }

    pub fn copies(&self) -> Vec<String> {
        self.copies.lock().unwrap().clone()
    }
}

impl ClipboardSink for MockClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        if self.unsupported.load(Ordering::SeqCst) {
            return Err(ClipboardError::Unsupported);
        }
        self.copies.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
