//! In-memory history store.
//!
//! Conversation records live in a `RwLock<HashMap>` and are lost when the
//! process terminates. Used by tests and ephemeral CLI runs.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::HistoryStore;
use crate::core::types::ConversationHistory;

pub struct InMemoryHistoryStore {
    records: RwLock<HashMap<String, ConversationHistory>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<ConversationHistory>> {
        let records = self.records.read().await;
        Ok(records.get(user_id).cloned())
    }

    async fn save(&self, history: &ConversationHistory) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(history.user_id.clone(), history.clone());
        tracing::debug!(
            "[InMemoryHistoryStore] Saved {} messages for user '{}'",
            history.messages.len(),
            history.user_id
        );
        Ok(())
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        records.remove(user_id);
        tracing::debug!("[InMemoryHistoryStore] Deleted record for user '{}'", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ChatMessage;

    #[tokio::test]
    async fn save_and_find_round_trip() {
        let store = InMemoryHistoryStore::new();
        let mut history = ConversationHistory::new("user-1");
        history.push(ChatMessage::user("Hello"));
        history.push(ChatMessage::assistant("Hi there"));

        store.save(&history).await.unwrap();
        let loaded = store.find_by_user("user-1").await.unwrap().unwrap();

        assert_eq!(loaded.messages.len(), 2);
        assert_eq!(loaded.messages[0].content, "Hello");
        assert_eq!(loaded.messages[1].content, "Hi there");
    }

    #[tokio::test]
    async fn absent_user_yields_none() {
        let store = InMemoryHistoryStore::new();
        assert!(store.find_by_user("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryHistoryStore::new();
        let mut history = ConversationHistory::new("user-1");
        history.push(ChatMessage::user("Test"));
        store.save(&history).await.unwrap();

        store.delete_by_user("user-1").await.unwrap();
        assert!(store.find_by_user("user-1").await.unwrap().is_none());

        // Deleting again succeeds silently.
        store.delete_by_user("user-1").await.unwrap();
    }

    #[tokio::test]
    async fn records_are_partitioned_by_user() {
        let store = InMemoryHistoryStore::new();
        let mut first = ConversationHistory::new("user-1");
        first.push(ChatMessage::user("mine"));
        let mut second = ConversationHistory::new("user-2");
        second.push(ChatMessage::user("theirs"));

        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();
        store.delete_by_user("user-1").await.unwrap();

        assert!(store.find_by_user("user-1").await.unwrap().is_none());
        let kept = store.find_by_user("user-2").await.unwrap().unwrap();
        assert_eq!(kept.messages[0].content, "theirs");
    }
}
