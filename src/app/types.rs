//! Type definitions for the interaction state.
//!
//! - [`Mode`] - the active interaction mode, carrying its own fields
//! - [`Handoff`] - work that needs the terminal and must run outside the
//!   event handler

use uuid::Uuid;

use crate::models::{Conversation, MessageRef};

/// The active interaction mode.
///
/// Each variant owns exactly the state that is meaningful in it, so for
/// example a command selection can never exist outside `CommandSelect`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mode {
    /// Typing prompts and scrolling the transcript
    #[default]
    Normal,
    /// Navigating messages; `cursor` is always in `1..len(messages)`
    Editing { cursor: usize },
    /// Browsing saved conversations, newest first
    History {
        items: Vec<Conversation>,
        selected: usize,
    },
    /// Choosing one of the commands extracted from reply `source`; never empty
    CommandSelect {
        commands: Vec<String>,
        selected: usize,
        source: MessageRef,
    },
    /// Key reference; any key leaves
    Help,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "Normal",
            Mode::Editing { .. } => "Editing",
            Mode::History { .. } => "History",
            Mode::CommandSelect { .. } => "Command",
            Mode::Help => "Help",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Mode::Normal)
    }
}

/// A request to give the terminal to an external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handoff {
    /// Edit user message `index` of conversation `conversation_id`
    Edit {
        conversation_id: Uuid,
        index: usize,
        content: String,
    },
}
