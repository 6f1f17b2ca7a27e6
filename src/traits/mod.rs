//! Trait abstractions for the engine's external collaborators.
//!
//! Production adapters live in `crate::adapters`; test doubles in
//! `crate::adapters::mock`.
//!
//! # Traits
//!
//! - [`AssistantClient`] - completion requests
//! - [`ConversationStore`] - snapshot save/list/load
//! - [`ProcessRunner`] - running shell commands
//! - [`ClipboardSink`] - copying text

pub mod assistant;
pub mod clipboard;
pub mod process;
pub mod store;

pub use assistant::AssistantClient;
pub use clipboard::ClipboardSink;
pub use process::{shell_argv, ProcessOutput, ProcessRunner};
pub use store::ConversationStore;
