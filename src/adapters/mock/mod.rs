//! Mock implementations for testing.
//!
//! Test doubles for every collaborator trait, so the engine can be driven
//! without network, disk, subprocesses or a display.
//!
//! # Available Mocks
//!
//! - [`MockAssistant`] - queued replies, recorded requests
//! - [`InMemoryStore`] - snapshots in a map, injectable failures
//! - [`MockProcessRunner`] - queued outputs, recorded argv
//! - [`MockClipboard`] - recorded copies, optional "unsupported" mode

pub mod assistant;
pub mod clipboard;
pub mod process;
pub mod store;

pub use assistant::{MockAssistant, RecordedCompletion};
pub use clipboard::MockClipboard;
pub use process::{MockProcessRunner, RecordedRun};
pub use store::InMemoryStore;
