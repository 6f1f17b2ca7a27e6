//! Domain objects for the interaction engine.
//!
//! - [`Viewport`] - rendered content plus a bounded vertical offset

pub mod scroll;

pub use scroll::{preserve_across_regeneration, Viewport, HISTORY_BIAS, MESSAGE_BIAS};
