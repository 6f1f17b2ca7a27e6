//! Conversation data model.
//!
//! - [`Role`] and [`Message`]: a single transcript entry
//! - [`Conversation`]: the persisted snapshot unit, keyed by id and creation time

mod conversation;
mod message;

pub use conversation::{summarize, Conversation, MessageRef, SUMMARY_MAX_CHARS};
pub use message::{Message, Role};
