//! Common test utilities for integration tests.
//!
//! [`TestApp`] wires an [`App`] to the in-memory collaborators and keeps
//! handles to them so tests can script replies and inspect side effects.
//!
//! # Example
//!
//! ```ignore
//! let mut t = TestApp::new();
//! t.assistant.push_reply("Try <command>ls</command>");
//! t.type_text("list files");
//! t.press(KeyCode::Enter);
//! t.pump().await;
//! ```

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use gpt_term::adapters::mock::{InMemoryStore, MockAssistant, MockClipboard, MockProcessRunner};
use gpt_term::app::{App, AppMessage, Collaborators};
use gpt_term::ui::theme::Theme;

pub const TEST_SYSTEM_PROMPT: &str = "test system prompt";

pub struct TestApp {
    pub app: App,
    pub rx: mpsc::UnboundedReceiver<AppMessage>,
    pub assistant: MockAssistant,
    pub store: InMemoryStore,
    pub runner: MockProcessRunner,
    pub clipboard: MockClipboard,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_clipboard(MockClipboard::new())
    }

    pub fn with_clipboard(clipboard: MockClipboard) -> Self {
        let assistant = MockAssistant::new();
        let store = InMemoryStore::new();
        let runner = MockProcessRunner::new();
        let collaborators = Collaborators {
            assistant: Arc::new(assistant.clone()),
            store: Arc::new(store.clone()),
            runner: Arc::new(runner.clone()),
            clipboard: Arc::new(clipboard.clone()),
        };
        let (mut app, rx) = App::new(collaborators, Theme::default(), TEST_SYSTEM_PROMPT, "true");
        app.set_terminal_size(80, 24);
        Self {
            app,
            rx,
            assistant,
            store,
            runner,
            clipboard,
        }
    }

    pub fn press(&mut self, code: KeyCode) {
        self.app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    pub fn ctrl(&mut self, c: char) {
        self.app
            .handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Type `text` and press Enter.
    pub fn send(&mut self, text: &str) {
        self.type_text(text);
        self.press(KeyCode::Enter);
    }

    /// Wait for the next background result without applying it.
    pub async fn next_message(&mut self) -> AppMessage {
        tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
            .await
            .expect("timed out waiting for a background result")
            .expect("message channel closed")
    }

    /// Wait for the next background result and apply it.
    pub async fn pump(&mut self) {
        let msg = self.next_message().await;
        self.app.handle_message(msg);
    }

    pub fn contents(&self) -> Vec<String> {
        self.app
            .conversation
            .messages
            .iter()
            .map(|m| m.content.clone())
            .collect()
    }

    pub fn rendered(&self) -> Vec<String> {
        self.app
            .viewport
            .lines()
            .iter()
            .map(|l| l.to_string())
            .collect()
    }
}
