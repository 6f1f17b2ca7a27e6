//! Error handling for gpt-term.
//!
//! - **Error Categories**: high-level classification used for status-area
//!   hints and retry decisions
//! - **Collaborator Errors**: one `thiserror` enum per external collaborator
//! - **Unified Error Type**: [`AppError`] consolidates them at the engine
//!   boundary
//!
//! Fatal startup failures never reach these types; `main` reports them
//! through `color_eyre`.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Assistant endpoint unreachable | Yes |
//! | Server | Failure status or unusable body | Yes |
//! | System | Snapshot, editor or shell failure | No |
//! | Platform | Clipboard or display missing | No |
//! | Configuration | Missing or invalid settings | No |

mod app_error;
mod category;
mod domain;

pub use app_error::AppError;
pub use category::ErrorCategory;
pub use domain::{AssistantError, ClipboardError, EditorError, ProcessError, StoreError};

/// Result alias used across the engine.
pub type AppResult<T> = Result<T, AppError>;
