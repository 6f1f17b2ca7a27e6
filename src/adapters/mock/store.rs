//! In-memory conversation store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::error::StoreError;
use crate::models::Conversation;
use crate::traits::ConversationStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    conversations: Arc<Mutex<HashMap<Uuid, Conversation>>>,
    saves: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
    fail_lists: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a snapshot without counting it as a save.
    pub fn insert(&self, conversation: Conversation) {
        self.conversations
            .lock()
            .unwrap()
            .insert(conversation.id, conversation);
    }

    pub fn get(&self, id: Uuid) -> Option<Conversation> {
        self.conversations.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.conversations.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    fn simulated_failure() -> StoreError {
        StoreError::io(
            "memory",
            std::io::Error::new(std::io::ErrorKind::Other, "simulated failure"),
        )
    }
}

impl ConversationStore for InMemoryStore {
    fn save(&self, conversation: &Conversation) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Self::simulated_failure());
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.insert(conversation.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Conversation>, StoreError> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(Self::simulated_failure());
        }
        Ok(self.conversations.lock().unwrap().values().cloned().collect())
    }

    fn load(&self, id: Uuid) -> Result<Conversation, StoreError> {
        self.get(id).ok_or(StoreError::NotFound(id))
    }
}
