//! Per-collaborator error types.
//!
//! Each external collaborator (assistant endpoint, snapshot store, process
//! layer, clipboard, editor) reports failures through its own enum. They are
//! unified by [`AppError`](super::AppError) at the engine boundary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Failures of a completion request.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The request never produced an HTTP response.
    #[error("failed to reach the assistant: {0}")]
    Connection(String),

    /// The endpoint answered with a non-success status.
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body could not be decoded.
    #[error("invalid response from the assistant: {0}")]
    InvalidResponse(String),

    /// The body decoded but carried no text.
    #[error("no content in response")]
    EmptyResponse,
}

/// Failures of the conversation snapshot store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode conversation: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("conversation {0} not found")]
    NotFound(Uuid),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures launching an external process.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("no command given")]
    EmptyCommand,

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed while talking to {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Failures copying text to the system clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard is not supported on this platform")]
    Unsupported,

    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("failed to copy to clipboard: {0}")]
    Copy(String),
}

/// Failures of the external editor hand-off.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid EDITOR value {value:?}: {reason}")]
    InvalidEditor { value: String, reason: String },

    #[error("failed to prepare the edit buffer: {0}")]
    TempFile(#[source] io::Error),

    #[error("failed to launch {editor}: {source}")]
    Launch {
        editor: String,
        #[source]
        source: io::Error,
    },

    #[error("{editor} exited with {status}")]
    Exited { editor: String, status: String },

    #[error("failed to read the edited text: {0}")]
    Read(#[source] io::Error),

    #[error("failed to hand the terminal over: {0}")]
    Terminal(String),
}
