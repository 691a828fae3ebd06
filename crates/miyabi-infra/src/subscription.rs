//! File-backed weather subscription store.
//!
//! A JSON array of user ids in the data directory. Loaded once at startup,
//! rewritten on every change. A missing file is an empty list.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tokio::sync::RwLock;

use miyabi_core::subscription::SubscriptionStore;
use miyabi_types::error::SubscriptionError;

pub struct FileSubscriptionStore {
    path: PathBuf,
    users: RwLock<BTreeSet<String>>,
}

impl FileSubscriptionStore {
    /// Load the store from `path`, treating a missing file as empty.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, SubscriptionError> {
        let path = path.into();
        let users = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str::<BTreeSet<String>>(&content)
                .map_err(|e| SubscriptionError::Corrupt(e.to_string()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no subscription file, starting empty");
                BTreeSet::new()
            }
            Err(err) => return Err(SubscriptionError::Storage(err.to_string())),
        };

        Ok(Self {
            path,
            users: RwLock::new(users),
        })
    }

    async fn persist(&self, users: &BTreeSet<String>) -> Result<(), SubscriptionError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SubscriptionError::Storage(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(users)
            .map_err(|e| SubscriptionError::Corrupt(e.to_string()))?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| SubscriptionError::Storage(e.to_string()))
    }
}

impl SubscriptionStore for FileSubscriptionStore {
    async fn subscribe(&self, user_id: &str) -> Result<bool, SubscriptionError> {
        let mut users = self.users.write().await;
        if users.contains(user_id) {
            return Ok(false);
        }
        // Persist a candidate set first so a write failure leaves memory unchanged.
        let mut next = users.clone();
        next.insert(user_id.to_string());
        self.persist(&next).await?;
        *users = next;
        Ok(true)
    }

    async fn unsubscribe(&self, user_id: &str) -> Result<bool, SubscriptionError> {
        let mut users = self.users.write().await;
        if !users.contains(user_id) {
            return Ok(false);
        }
        let mut next = users.clone();
        next.remove(user_id);
        self.persist(&next).await?;
        *users = next;
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<String>, SubscriptionError> {
        Ok(self.users.read().await.iter().cloned().collect())
    }
}
