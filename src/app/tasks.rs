//! Background task coordination.
//!
//! Each operation that leaves the process runs on its own tokio task with
//! owned copies of its inputs and reports back through the engine's
//! channel as an [`AppMessage`]. Nothing here touches engine state.

use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use super::messages::AppMessage;
use crate::models::{Conversation, Message, MessageRef};
use crate::traits::{shell_argv, AssistantClient, ClipboardSink, ConversationStore, ProcessRunner};

/// The external collaborators the engine depends on.
#[derive(Clone)]
pub struct Collaborators {
    pub assistant: Arc<dyn AssistantClient>,
    pub store: Arc<dyn ConversationStore>,
    pub runner: Arc<dyn ProcessRunner>,
    pub clipboard: Arc<dyn ClipboardSink>,
}

pub struct TaskCoordinator {
    collaborators: Collaborators,
    tx: mpsc::UnboundedSender<AppMessage>,
}

impl TaskCoordinator {
    pub fn new(collaborators: Collaborators, tx: mpsc::UnboundedSender<AppMessage>) -> Self {
        Self { collaborators, tx }
    }

    /// Request the next reply for `conversation`.
    pub fn spawn_completion(&self, conversation: &Conversation) {
        let assistant = Arc::clone(&self.collaborators.assistant);
        let tx = self.tx.clone();
        let conversation_id = conversation.id;
        let system = conversation.system_prompt().unwrap_or_default().to_string();
        let history: Vec<Message> = conversation.turns().cloned().collect();

        tracing::info!(%conversation_id, turns = history.len(), "requesting completion");

        tokio::spawn(async move {
            let result = assistant.complete(&system, &history).await;
            let _ = tx.send(AppMessage::CompletionFinished {
                conversation_id,
                result,
            });
        });
    }

    /// Run `command` through `sh -c`.
    pub fn spawn_command(&self, conversation_id: Uuid, source: MessageRef, command: String) {
        let runner = Arc::clone(&self.collaborators.runner);
        let tx = self.tx.clone();

        tracing::info!(%conversation_id, %command, "running command");

        tokio::spawn(async move {
            let result = runner.run(&shell_argv(&command), None).await;
            let _ = tx.send(AppMessage::CommandFinished {
                conversation_id,
                source,
                command,
                result,
            });
        });
    }

    /// Copy `text` to the clipboard on a blocking thread.
    pub fn spawn_copy(&self, text: String) {
        let clipboard = Arc::clone(&self.collaborators.clipboard);
        let tx = self.tx.clone();

        tokio::task::spawn_blocking(move || {
            let result = clipboard.copy(&text);
            let _ = tx.send(AppMessage::ClipboardFinished(result));
        });
    }
}
