//! Keyed conversation store with per-user serialization.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use miyabi_types::conversation::Conversation;

/// Process-wide registry of per-user conversations.
///
/// Each user id maps to its own `Arc<Mutex<Conversation>>`. Callers lock the
/// handle for the duration of a turn (including the completion call), so
/// concurrent messages from one user serialize while different users proceed
/// independently. Nothing is persisted; lifetime is the process.
#[derive(Default)]
pub struct ConversationStore {
    inner: DashMap<String, Arc<Mutex<Conversation>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for one user's conversation, created empty on first contact.
    pub fn entry(&self, user_id: &str) -> Arc<Mutex<Conversation>> {
        self.inner.entry(user_id.to_string()).or_default().clone()
    }

    /// Number of users with a conversation handle.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
