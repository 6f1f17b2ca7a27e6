use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::{Message, Role};

/// Summaries longer than this many characters are shortened.
pub const SUMMARY_MAX_CHARS: usize = 50;
const SUMMARY_KEEP_CHARS: usize = 47;

/// Identifies one message of a conversation: its position plus its
/// timestamp, so a slot that was truncated and refilled does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
}

/// An ordered exchange between the operator and the assistant.
///
/// `messages[0]` is always the hidden system prompt. Messages are only ever
/// appended, except for [`Conversation::commit_edit`] which rewrites one user
/// message and discards everything after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub summary: String,
}

impl Conversation {
    /// Start a fresh conversation seeded with the system prompt.
    pub fn new(system_prompt: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: vec![Message::system(system_prompt)],
            created_at: Utc::now(),
            summary: String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True once anything besides the system prompt has been added.
    pub fn has_exchanges(&self) -> bool {
        self.messages.len() > 1
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
    }

    /// Messages that are sent to the assistant as turns.
    pub fn turns(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role != Role::System)
    }

    pub fn push(&mut self, message: Message) {
        let is_user = message.role == Role::User;
        self.messages.push(message);
        if is_user {
            self.refresh_summary();
        }
    }

    /// Replace the user message at `index` and drop every later message.
    ///
    /// Returns false (leaving the conversation untouched) when `index` does
    /// not point at a user message.
    pub fn commit_edit(&mut self, index: usize, content: impl Into<String>) -> bool {
        match self.messages.get(index) {
            Some(msg) if msg.role == Role::User && index > 0 => {}
            _ => return false,
        }
        self.messages.truncate(index + 1);
        let msg = &mut self.messages[index];
        msg.content = content.into();
        msg.timestamp = Utc::now();
        self.refresh_summary();
        true
    }

    pub fn message_ref(&self, index: usize) -> Option<MessageRef> {
        self.messages.get(index).map(|m| MessageRef {
            index,
            timestamp: m.timestamp,
        })
    }

    /// True while the referenced message is still part of the conversation.
    pub fn contains(&self, message: &MessageRef) -> bool {
        self.messages
            .get(message.index)
            .is_some_and(|m| m.timestamp == message.timestamp)
    }

    pub fn last_assistant_index(&self) -> Option<usize> {
        self.messages
            .iter()
            .rposition(|m| m.role == Role::Assistant)
    }

    pub fn refresh_summary(&mut self) {
        self.summary = self
            .messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| summarize(&m.content))
            .unwrap_or_default();
    }
}

/// Shorten `text` for the history list.
pub fn summarize(text: &str) -> String {
    if text.chars().count() <= SUMMARY_MAX_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(SUMMARY_KEEP_CHARS).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Conversation {
        let mut convo = Conversation::new("prompt");
        convo.push(Message::user("hi"));
        convo.push(Message::assistant("hello"));
        convo
    }

    #[test]
    fn test_message_ref_lost_after_edit() {
        let mut convo = sample();
        let reply = convo.message_ref(2).unwrap();
        assert!(convo.contains(&reply));

        assert!(convo.commit_edit(1, "hi again"));
        assert!(!convo.contains(&reply));
        convo.push(Message::assistant("fresh"));
        assert!(!convo.contains(&reply));
    }

    #[test]
    fn test_new_has_only_system_message() {
        let convo = Conversation::new("be helpful");
        assert_eq!(convo.len(), 1);
        assert_eq!(convo.system_prompt(), Some("be helpful"));
        assert!(!convo.has_exchanges());
        assert!(convo.summary.is_empty());
    }

    #[test]
    fn test_summary_tracks_first_user_message() {
        let mut convo = sample();
        assert_eq!(convo.summary, "hi");
        convo.push(Message::user("second"));
        assert_eq!(convo.summary, "hi");
    }

    #[test]
    fn test_summarize_boundaries() {
        let fifty = "a".repeat(50);
        assert_eq!(summarize(&fifty), fifty);

        let long = "b".repeat(51);
        let short = summarize(&long);
        assert_eq!(short.chars().count(), 50);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn test_summarize_is_char_safe() {
        let text = "é".repeat(60);
        let short = summarize(&text);
        assert_eq!(short, format!("{}...", "é".repeat(47)));
    }

    #[test]
    fn test_commit_edit_truncates_after_index() {
        let mut convo = sample();
        assert!(convo.commit_edit(1, "hey"));
        assert_eq!(convo.len(), 2);
        assert_eq!(convo.messages[1].content, "hey");
        assert_eq!(convo.summary, "hey");
    }

    #[test]
    fn test_commit_edit_rejects_non_user_messages() {
        let mut convo = sample();
        assert!(!convo.commit_edit(0, "x"));
        assert!(!convo.commit_edit(2, "x"));
        assert!(!convo.commit_edit(9, "x"));
        assert_eq!(convo.len(), 3);
    }

    #[test]
    fn test_last_assistant_index() {
        let mut convo = sample();
        convo.push(Message::user("more"));
        assert_eq!(convo.last_assistant_index(), Some(2));
        assert_eq!(Conversation::new("p").last_assistant_index(), None);
    }

    #[test]
    fn test_turns_skip_system() {
        let convo = sample();
        let roles: Vec<Role> = convo.turns().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
    }

    #[test]
    fn test_snapshot_round_trip_keeps_order() {
        let convo = sample();
        let json = serde_json::to_string_pretty(&convo).unwrap();
        let back: Conversation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, convo);
    }
}
