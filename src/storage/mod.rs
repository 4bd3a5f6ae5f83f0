//! Conversation history persistence.
//!
//! The store is the document-database collaborator: one record per user
//! identity, fetched and replaced whole. Backends are swappable behind
//! the trait: in-memory for tests and ephemeral runs, filesystem for a
//! durable document-per-user layout.

use anyhow::Result;
use async_trait::async_trait;

use crate::core::types::ConversationHistory;

pub mod filesystem;
pub mod memory;

pub use filesystem::FileHistoryStore;
pub use memory::InMemoryHistoryStore;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Fetch the conversation record for a user, if one exists.
    async fn find_by_user(&self, user_id: &str) -> Result<Option<ConversationHistory>>;

    /// Persist the full record, replacing any previous version.
    async fn save(&self, history: &ConversationHistory) -> Result<()>;

    /// Remove the record. Deleting an absent record is not an error.
    async fn delete_by_user(&self, user_id: &str) -> Result<()>;
}
