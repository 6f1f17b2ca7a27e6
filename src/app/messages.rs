//! AppMessage enum for async results flowing back into the engine.

use uuid::Uuid;

use crate::error::{AssistantError, ClipboardError, EditorError, ProcessError};
use crate::models::MessageRef;
use crate::traits::ProcessOutput;

/// Results of background work, consumed by [`App::handle_message`].
///
/// Results that belong to a conversation carry the id it was issued for,
/// so a reply that arrives after the operator switched conversations is
/// applied to the right snapshot.
///
/// [`App::handle_message`]: super::App::handle_message
#[derive(Debug)]
pub enum AppMessage {
    /// A completion request finished
    CompletionFinished {
        conversation_id: Uuid,
        result: Result<String, AssistantError>,
    },
    /// A shell command finished (or failed to start)
    CommandFinished {
        conversation_id: Uuid,
        /// The reply the command was taken from
        source: MessageRef,
        command: String,
        result: Result<ProcessOutput, ProcessError>,
    },
    /// A clipboard copy finished
    ClipboardFinished(Result<(), ClipboardError>),
    /// The external editor returned
    EditFinished {
        conversation_id: Uuid,
        index: usize,
        result: Result<String, EditorError>,
    },
}
