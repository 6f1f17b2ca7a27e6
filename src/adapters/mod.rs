//! Concrete implementations of the collaborator traits.
//!
//! # Adapters
//!
//! - [`AnthropicClient`] - completions over the Anthropic Messages API (reqwest)
//! - [`FileConversationStore`] - JSON snapshots under `~/.gpt-term/conversations`
//! - [`TokioProcessRunner`] - subprocesses via `tokio::process`
//! - [`SystemClipboard`] - the OS clipboard via `arboard`
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for all of them.

pub mod anthropic;
pub mod clipboard;
pub mod file_store;
pub mod mock;
pub mod shell;

pub use anthropic::AnthropicClient;
pub use clipboard::SystemClipboard;
pub use file_store::FileConversationStore;
pub use shell::TokioProcessRunner;
