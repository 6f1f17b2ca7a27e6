//! Unified error type for the interaction engine.

use thiserror::Error;

use super::category::ErrorCategory;
use super::domain::{AssistantError, ClipboardError, EditorError, ProcessError, StoreError};

/// Any recoverable failure the engine can surface to the operator.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Assistant(#[from] AssistantError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Assistant(AssistantError::Connection(_)) => ErrorCategory::Network,
            AppError::Assistant(_) => ErrorCategory::Server,
            AppError::Store(_) | AppError::Process(_) | AppError::Editor(_) => {
                ErrorCategory::System
            }
            AppError::Clipboard(_) => ErrorCategory::Platform,
            AppError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Single-line text for the status area.
    ///
    /// Newlines in the underlying message (for example a multi-line HTTP
    /// body) are folded so the status row never spills.
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        let folded: Vec<&str> = text.split_whitespace().collect();
        folded.join(" ")
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }
}
