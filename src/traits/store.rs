//! Conversation snapshot persistence abstraction.

use uuid::Uuid;

use crate::error::StoreError;
use crate::models::Conversation;

/// Whole-snapshot storage for conversations.
///
/// Calls are synchronous and expected to be fast local I/O; the engine calls
/// them inline from the event loop.
pub trait ConversationStore: Send + Sync {
    /// Write the complete snapshot, replacing any previous one for the same id.
    fn save(&self, conversation: &Conversation) -> Result<(), StoreError>;

    /// Every readable snapshot, in no particular order.
    fn list(&self) -> Result<Vec<Conversation>, StoreError>;

    /// Load one snapshot. Fails with [`StoreError::NotFound`] if it is absent.
    fn load(&self, id: Uuid) -> Result<Conversation, StoreError>;
}
