//! Remote assistant abstraction.
//!
//! The engine only needs one operation from the assistant: given the system
//! prompt and the non-system turns of a conversation, produce the next reply.

use async_trait::async_trait;

use crate::error::AssistantError;
use crate::models::Message;

/// A completion backend.
///
/// Implementations must be cheap to share across tasks; the engine keeps one
/// behind an `Arc` and clones the history into every spawned request.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Request the next assistant reply.
    ///
    /// `history` never contains `system` messages; the prompt travels in
    /// `system` instead.
    async fn complete(&self, system: &str, history: &[Message]) -> Result<String, AssistantError>;
}
