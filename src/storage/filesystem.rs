//! Filesystem history store.
//!
//! Each user's conversation is one JSON document at
//! `{base_path}/{user_id}.json`, mirroring the one-record-per-user shape
//! of a document database. Records are read and replaced whole.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::fs;

use super::HistoryStore;
use crate::core::types::ConversationHistory;

pub struct FileHistoryStore {
    base_path: PathBuf,
}

impl FileHistoryStore {
    pub async fn new(base_path: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_path)
            .await
            .context("Failed to create history storage directory")?;

        Ok(Self { base_path })
    }

    fn record_path(&self, user_id: &str) -> Result<PathBuf> {
        // The user id becomes a file name; refuse anything that could
        // escape the storage directory.
        if user_id.is_empty()
            || user_id.contains(['/', '\\'])
            || user_id.contains("..")
        {
            bail!("invalid user id for history record: {:?}", user_id);
        }
        Ok(self.base_path.join(format!("{}.json", user_id)))
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<ConversationHistory>> {
        let path = self.record_path(user_id)?;

        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)
            .await
            .context(format!("Failed to read history record: {:?}", path))?;

        let history: ConversationHistory = serde_json::from_str(&json)
            .context(format!("Invalid conversation record: {:?}", path))?;

        tracing::debug!(
            "[FileHistoryStore] Loaded {} messages for user '{}'",
            history.messages.len(),
            user_id
        );
        Ok(Some(history))
    }

    async fn save(&self, history: &ConversationHistory) -> Result<()> {
        let path = self.record_path(&history.user_id)?;
        let json = serde_json::to_string_pretty(history)
            .context("Failed to serialize conversation record")?;

        fs::write(&path, json)
            .await
            .context(format!("Failed to write history record: {:?}", path))?;

        tracing::debug!(
            "[FileHistoryStore] Saved {} messages for user '{}' to {:?}",
            history.messages.len(),
            history.user_id,
            path
        );
        Ok(())
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<()> {
        let path = self.record_path(user_id)?;

        if path.exists() {
            fs::remove_file(&path)
                .await
                .context(format!("Failed to delete history record: {:?}", path))?;
            tracing::debug!("[FileHistoryStore] Deleted record for user '{}'", user_id);
        }

        Ok(())
    }
}
