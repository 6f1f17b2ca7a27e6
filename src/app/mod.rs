//! Interaction engine.
//!
//! [`App`] owns the live conversation, the interaction mode, the viewport
//! and the prompt input. It is mutated only from the event loop: terminal
//! events go through [`App::handle_event`], async results through
//! [`App::handle_message`]. Work that leaves the process is started through
//! the [`TaskCoordinator`] and comes back as an [`AppMessage`].
//!
//! # Example
//!
//! ```ignore
//! let (mut app, mut rx) = App::new(collaborators, Theme::default(), SYSTEM_PROMPT, "nvim");
//! app.set_terminal_size(120, 40);
//! app.handle_event(key_event);
//! if let Some(msg) = rx.recv().await {
//!     app.handle_message(msg);
//! }
//! ```

mod handlers;
mod messages;
pub mod prompts;
mod tasks;
mod types;
mod view;

pub use messages::AppMessage;
pub use tasks::{Collaborators, TaskCoordinator};
pub use types::{Handoff, Mode};

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::commands;
use crate::domain::{Viewport, HISTORY_BIAS, MESSAGE_BIAS};
use crate::editor::normalize_edit;
use crate::error::{AppError, StoreError};
use crate::models::{Conversation, Message, MessageRef, Role};
use crate::ui::theme::Theme;
use crate::widgets::InputBox;

/// Rows of chrome around the viewport (title, two scroll indicators,
/// separator, input, status, hints).
pub const CHROME_ROWS: u16 = 7;
/// Columns of horizontal margin around the viewport.
pub const MARGIN_COLUMNS: u16 = 4;
/// Rows moved by arrow keys and the mouse wheel.
pub const SCROLL_STEP: isize = 3;

pub struct App {
    /// The conversation being displayed
    pub conversation: Conversation,
    pub mode: Mode,
    pub viewport: Viewport,
    pub input: InputBox,
    /// Most recent recoverable error, shown in the status row
    pub last_error: Option<AppError>,
    /// Transient confirmation, cleared by the next key press
    pub notice: Option<String>,
    /// Tick counter driving the spinner
    pub tick_count: u64,
    /// Dirty flag: redraw on the next loop iteration
    pub needs_redraw: bool,
    pub should_quit: bool,
    pub theme: Theme,
    /// Editor command line, e.g. `nvim` or `code --wait`
    pub editor: String,
    /// Row of each message (or list entry) in the viewport content
    anchors: Vec<usize>,
    /// Conversations with an outstanding completion request
    in_flight: HashSet<Uuid>,
    running_commands: usize,
    pending_handoff: Option<Handoff>,
    /// Position in the recency-sorted list for Ctrl+L cycling
    last_loaded: Option<usize>,
    system_prompt: String,
    collaborators: Collaborators,
    tasks: TaskCoordinator,
}

impl App {
    /// Build the engine. The returned receiver yields the results of every
    /// task the engine spawns; feed them back through
    /// [`handle_message`](Self::handle_message).
    pub fn new(
        collaborators: Collaborators,
        theme: Theme,
        system_prompt: impl Into<String>,
        editor: impl Into<String>,
    ) -> (Self, mpsc::UnboundedReceiver<AppMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let system_prompt = system_prompt.into();
        let mut app = Self {
            conversation: Conversation::new(&system_prompt),
            mode: Mode::Normal,
            viewport: Viewport::new(),
            input: InputBox::new(),
            last_error: None,
            notice: None,
            tick_count: 0,
            needs_redraw: true,
            should_quit: false,
            theme,
            editor: editor.into(),
            anchors: Vec::new(),
            in_flight: HashSet::new(),
            running_commands: 0,
            pending_handoff: None,
            last_loaded: None,
            system_prompt,
            tasks: TaskCoordinator::new(collaborators.clone(), tx),
            collaborators,
        };
        app.regenerate();
        (app, rx)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// True while a completion for the displayed conversation is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.contains(&self.conversation.id)
    }

    pub fn running_commands(&self) -> usize {
        self.running_commands
    }

    /// True while anything the spinner reports on is running.
    pub fn is_busy(&self) -> bool {
        self.is_loading() || self.running_commands > 0
    }

    pub fn anchors(&self) -> &[usize] {
        &self.anchors
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Advance the spinner.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.is_busy() {
            self.mark_dirty();
        }
    }

    /// Take the pending terminal hand-off, if any.
    pub fn take_handoff(&mut self) -> Option<Handoff> {
        self.pending_handoff.take()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Resize the viewport from the full terminal size.
    pub fn set_terminal_size(&mut self, width: u16, height: u16) {
        self.viewport.set_size(
            width.saturating_sub(MARGIN_COLUMNS),
            height.saturating_sub(CHROME_ROWS),
        );
        let at_bottom = !self.viewport.can_scroll_down();
        self.regenerate();
        if matches!(self.mode, Mode::Help) {
            self.viewport.goto_top();
        } else if at_bottom && self.mode.is_normal() {
            self.viewport.goto_bottom();
        }
        self.mark_dirty();
    }

    /// Rebuild the viewport content for the current mode. Must run after
    /// every state change that alters what is displayed and before any
    /// scroll positioning.
    pub fn regenerate(&mut self) {
        let content = view::build(self);
        self.anchors = content.anchors;
        self.viewport.set_content(content.lines);
        self.mark_dirty();
    }

    // ------------------------------------------------------------------
    // Error reporting
    // ------------------------------------------------------------------

    pub(crate) fn report(&mut self, err: impl Into<AppError>) {
        let err = err.into();
        tracing::error!(category = %err.category(), error = %err, "operation failed");
        self.last_error = Some(err);
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(text.into());
        self.mark_dirty();
    }

    fn save_current(&mut self) {
        if let Err(err) = self.collaborators.store.save(&self.conversation) {
            self.report(err);
        }
    }

    // ------------------------------------------------------------------
    // Conversation actions
    // ------------------------------------------------------------------

    /// Send the prompt input as a new user message.
    ///
    /// With an empty prompt and an unanswered trailing user message, the
    /// request for that message is retried instead.
    pub fn send(&mut self) {
        if self.is_loading() {
            self.set_notice("Waiting for the current reply");
            return;
        }

        let text = self.input.get_content().trim().to_string();
        if text.is_empty() {
            self.retry();
            return;
        }

        self.input.clear();
        self.last_error = None;
        self.conversation.push(Message::user(text));
        self.save_current();
        self.start_completion();
        self.show_bottom();
    }

    fn retry(&mut self) {
        let unanswered = self
            .conversation
            .messages
            .last()
            .is_some_and(|m| m.role == Role::User);
        if unanswered {
            tracing::info!(id = %self.conversation.id, "retrying unanswered message");
            self.last_error = None;
            self.start_completion();
            self.mark_dirty();
        }
    }

    fn start_completion(&mut self) {
        self.in_flight.insert(self.conversation.id);
        self.tasks.spawn_completion(&self.conversation);
    }

    /// Replace the displayed conversation with a fresh one.
    pub fn new_chat(&mut self) {
        self.conversation = Conversation::new(&self.system_prompt);
        self.last_error = None;
        self.mode = Mode::Normal;
        self.regenerate();
        self.viewport.goto_top();
        tracing::info!(id = %self.conversation.id, "new chat");
    }

    fn load_conversation(&mut self, conversation: Conversation) {
        tracing::info!(id = %conversation.id, "loading conversation");
        self.conversation = conversation;
        self.last_error = None;
        self.mode = Mode::Normal;
        self.show_bottom();
    }

    fn sorted_conversations(&mut self) -> Option<Vec<Conversation>> {
        match self.collaborators.store.list() {
            Ok(mut items) => {
                items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Some(items)
            }
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    /// Load the next most recent saved conversation, wrapping around.
    pub fn cycle_conversation(&mut self) {
        let Some(items) = self.sorted_conversations() else {
            return;
        };
        if items.is_empty() {
            return;
        }
        let next = match self.last_loaded {
            Some(i) if i + 1 < items.len() => i + 1,
            _ => 0,
        };
        self.last_loaded = Some(next);
        if let Some(conversation) = items.into_iter().nth(next) {
            self.load_conversation(conversation);
        }
    }

    // ------------------------------------------------------------------
    // Mode transitions
    // ------------------------------------------------------------------

    pub fn enter_normal(&mut self) {
        self.mode = Mode::Normal;
        self.show_bottom();
    }

    fn show_bottom(&mut self) {
        self.regenerate();
        self.viewport.goto_bottom();
    }

    /// Enter edit navigation with the last message selected.
    pub fn enter_editing(&mut self) {
        if !self.conversation.has_exchanges() {
            return;
        }
        self.mode = Mode::Editing {
            cursor: self.conversation.len() - 1,
        };
        self.show_bottom();
    }

    pub fn move_edit_cursor(&mut self, delta: isize) {
        let Mode::Editing { cursor } = self.mode else {
            return;
        };
        let last = self.conversation.len().saturating_sub(1);
        if last == 0 {
            return;
        }
        let moved = cursor.saturating_add_signed(delta).clamp(1, last);
        self.mode = Mode::Editing { cursor: moved };
        self.regenerate();
        if moved == last {
            self.viewport.goto_bottom();
        } else if let Some(&row) = self.anchors.get(moved) {
            self.viewport.ensure_visible(row, MESSAGE_BIAS);
        }
    }

    pub fn enter_history(&mut self) {
        let Some(items) = self.sorted_conversations() else {
            return;
        };
        self.mode = Mode::History { items, selected: 0 };
        self.regenerate();
        self.viewport.goto_top();
    }

    /// Move the history or command selection, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        let (len, selected) = match &mut self.mode {
            Mode::History { items, selected } => (items.len(), selected),
            Mode::CommandSelect {
                commands, selected, ..
            } => (commands.len(), selected),
            _ => return,
        };
        if len == 0 {
            return;
        }
        let moved = selected.saturating_add_signed(delta).min(len - 1);
        if moved == *selected {
            return;
        }
        *selected = moved;
        self.regenerate();
        if let Some(&row) = self.anchors.get(moved) {
            self.viewport.ensure_visible(row, HISTORY_BIAS);
        }
    }

    pub fn select_history_entry(&mut self) {
        let Mode::History { items, selected } = &mut self.mode else {
            return;
        };
        if items.is_empty() {
            return;
        }
        let conversation = items.swap_remove(*selected);
        self.load_conversation(conversation);
    }

    pub fn show_help(&mut self) {
        self.mode = Mode::Help;
        self.regenerate();
        self.viewport.goto_top();
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Offer the commands of the targeted assistant message for selection.
    ///
    /// In edit mode the target is the selected message (which must be an
    /// assistant message); elsewhere it is the most recent assistant message.
    pub fn execute(&mut self) {
        let target = match self.mode {
            Mode::Editing { cursor } => Some(cursor),
            _ => self.conversation.last_assistant_index(),
        };
        let Some(index) = target else {
            return;
        };
        let Some(message) = self
            .conversation
            .messages
            .get(index)
            .filter(|m| m.role == Role::Assistant)
        else {
            return;
        };

        let commands = commands::extract(&message.content);
        if commands.is_empty() {
            return;
        }
        let Some(source) = self.conversation.message_ref(index) else {
            return;
        };
        tracing::debug!(count = commands.len(), "entering command selection");
        self.mode = Mode::CommandSelect {
            commands,
            selected: 0,
            source,
        };
        self.regenerate();
        self.viewport.goto_top();
    }

    /// Run command `index` of the current selection.
    pub fn run_command(&mut self, index: usize) {
        let Mode::CommandSelect {
            commands, source, ..
        } = &self.mode
        else {
            return;
        };
        let Some(command) = commands.get(index).cloned() else {
            return;
        };
        let source = *source;
        self.running_commands += 1;
        self.tasks
            .spawn_command(self.conversation.id, source, command.clone());
        self.set_notice(format!("Running: {}", command));
        self.enter_normal();
    }

    /// Copy the selected command and leave the selection.
    pub fn copy_selected_command(&mut self) {
        let Mode::CommandSelect {
            commands, selected, ..
        } = &self.mode
        else {
            return;
        };
        if let Some(command) = commands.get(*selected).cloned() {
            self.tasks.spawn_copy(command);
        }
        self.enter_normal();
    }

    /// Copy the message under the edit cursor.
    pub fn copy_selected_message(&mut self) {
        let Mode::Editing { cursor } = self.mode else {
            return;
        };
        if let Some(message) = self.conversation.messages.get(cursor) {
            self.tasks.spawn_copy(message.content.clone());
        }
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Enter on a message in edit mode: hand a user message to the editor,
    /// anything else returns to normal mode.
    pub fn edit_selected(&mut self) {
        let Mode::Editing { cursor } = self.mode else {
            return;
        };
        let Some(message) = self.conversation.messages.get(cursor) else {
            return;
        };
        if message.role != Role::User {
            self.enter_normal();
            return;
        }
        let content = message.content.clone();
        if self.is_loading() {
            self.set_notice("Wait for the current reply before editing");
            return;
        }
        self.pending_handoff = Some(Handoff::Edit {
            conversation_id: self.conversation.id,
            index: cursor,
            content,
        });
    }

    fn commit_edit(&mut self, conversation_id: Uuid, index: usize, edited: String) {
        if conversation_id != self.conversation.id {
            tracing::warn!(%conversation_id, "edit finished for a conversation that is no longer shown");
            return;
        }
        let Some(text) = normalize_edit(&edited) else {
            self.set_notice("Edit cancelled: message was empty");
            return;
        };
        if self.is_loading() {
            self.set_notice("Wait for the current reply before editing");
            return;
        }
        if !self.conversation.commit_edit(index, text) {
            return;
        }
        tracing::info!(id = %conversation_id, index, "committed edit");
        self.last_error = None;
        self.save_current();
        self.mode = Mode::Normal;
        self.start_completion();
        self.show_bottom();
    }

    // ------------------------------------------------------------------
    // Async results
    // ------------------------------------------------------------------

    /// Apply the result of a background task.
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::CompletionFinished {
                conversation_id,
                result,
            } => {
                self.in_flight.remove(&conversation_id);
                match result {
                    Ok(text) => self.append_to(conversation_id, Message::assistant(text), None),
                    Err(err) => self.report(err),
                }
            }
            AppMessage::CommandFinished {
                conversation_id,
                source,
                command,
                result,
            } => {
                self.running_commands = self.running_commands.saturating_sub(1);
                match result {
                    Ok(output) => {
                        let text = commands::format_execution(&command, &output);
                        self.append_to(conversation_id, Message::assistant(text), Some(&source));
                    }
                    Err(err) => self.report(err),
                }
            }
            AppMessage::ClipboardFinished(result) => match result {
                Ok(()) => self.set_notice("Copied to clipboard"),
                Err(err) => self.report(err),
            },
            AppMessage::EditFinished {
                conversation_id,
                index,
                result,
            } => match result {
                Ok(text) => self.commit_edit(conversation_id, index, text),
                Err(err) => self.report(err),
            },
        }
        self.mark_dirty();
    }

    /// Append `message` to conversation `id`, whether or not it is shown.
    ///
    /// With a `source`, the message is dropped unless that reply is still in
    /// the conversation; an edit may have discarded it in the meantime.
    fn append_to(&mut self, id: Uuid, message: Message, source: Option<&MessageRef>) {
        if id == self.conversation.id {
            if source.is_some_and(|s| !self.conversation.contains(s)) {
                tracing::warn!(%id, "dropping command output for a discarded reply");
                return;
            }
            self.conversation.push(message);
            self.save_current();
            self.regenerate();
            if self.mode.is_normal() {
                self.viewport.goto_bottom();
            }
            return;
        }

        let store = Arc::clone(&self.collaborators.store);
        match store.load(id) {
            Ok(mut snapshot) => {
                if source.is_some_and(|s| !snapshot.contains(s)) {
                    tracing::warn!(%id, "dropping command output for a discarded reply");
                    return;
                }
                snapshot.push(message);
                match store.save(&snapshot) {
                    Ok(()) => {
                        tracing::info!(%id, "applied result to background conversation");
                        let summary = snapshot.summary.clone();
                        self.set_notice(format!("Reply saved to \"{}\"", summary));
                    }
                    Err(err) => self.report(err),
                }
            }
            Err(StoreError::NotFound(_)) => {
                tracing::warn!(%id, "dropping result for a conversation that was never saved");
            }
            Err(err) => self.report(err),
        }
    }
}
