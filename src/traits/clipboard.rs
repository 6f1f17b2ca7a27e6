//! System clipboard abstraction.

use crate::error::ClipboardError;

/// Destination for copied text.
///
/// Copies may block briefly (X11 and Wayland round trips), so the engine
/// calls this from a blocking task.
pub trait ClipboardSink: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}
