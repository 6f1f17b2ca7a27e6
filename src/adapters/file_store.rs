//! File-based conversation store.
//!
//! One pretty-printed JSON snapshot per conversation, named
//! `<created_at>_<id>.convo` with the timestamp formatted as
//! `%Y-%m-%dT%H-%M-%S` so names sort chronologically and are valid on every
//! filesystem. Saves go through a sibling temp file and a rename, so a
//! snapshot on disk is always either the old or the new version.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::StoreError;
use crate::models::Conversation;
use crate::traits::ConversationStore;

pub const SNAPSHOT_EXTENSION: &str = "convo";
const FILE_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

#[derive(Debug, Clone)]
pub struct FileConversationStore {
    dir: PathBuf,
}

impl FileConversationStore {
    /// Open the store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(conversation: &Conversation) -> String {
        format!(
            "{}_{}.{}",
            conversation.created_at.format(FILE_TIME_FORMAT),
            conversation.id,
            SNAPSHOT_EXTENSION
        )
    }

    pub fn path_for(&self, conversation: &Conversation) -> PathBuf {
        self.dir.join(Self::file_name(conversation))
    }

    fn snapshot_paths(&self) -> Result<Vec<PathBuf>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.dir, e)),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(SNAPSHOT_EXTENSION) {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    fn read_snapshot(path: &Path) -> Result<Conversation, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }
}

impl ConversationStore for FileConversationStore {
    fn save(&self, conversation: &Conversation) -> Result<(), StoreError> {
        let path = self.path_for(conversation);
        let tmp = self
            .dir
            .join(format!(".{}.tmp", Self::file_name(conversation)));

        let json = serde_json::to_string_pretty(conversation)?;
        fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(&path, e));
        }

        tracing::debug!(id = %conversation.id, path = %path.display(), "saved conversation");
        Ok(())
    }

    fn list(&self) -> Result<Vec<Conversation>, StoreError> {
        let mut conversations = Vec::new();
        for path in self.snapshot_paths()? {
            match Self::read_snapshot(&path) {
                Ok(convo) => conversations.push(convo),
                Err(reason) => {
                    tracing::warn!(path = %path.display(), %reason, "skipping unreadable snapshot");
                }
            }
        }
        Ok(conversations)
    }

    fn load(&self, id: Uuid) -> Result<Conversation, StoreError> {
        let suffix = format!("_{}.{}", id, SNAPSHOT_EXTENSION);
        for path in self.snapshot_paths()? {
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(&suffix));
            if !matches {
                continue;
            }
            match Self::read_snapshot(&path) {
                Ok(convo) if convo.id == id => return Ok(convo),
                Ok(_) => {}
                Err(reason) => {
                    tracing::warn!(path = %path.display(), %reason, "unreadable snapshot");
                }
            }
        }
        Err(StoreError::NotFound(id))
    }
}
