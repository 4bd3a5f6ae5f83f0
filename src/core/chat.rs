//! Chat orchestration.
//!
//! One request is one pass: load the caller's history, assemble the
//! bounded prompt window, invoke the completion client once, then append
//! both sides of the exchange and persist. A failed completion ends the
//! request with a classified error and leaves the stored history exactly
//! as it was; the user's message is not recorded as unanswered.

use std::sync::Arc;

use crate::core::completion::CompletionClient;
use crate::core::context;
use crate::core::types::{ChatMessage, ChatTurn, ConversationHistory};
use crate::error::ChatError;
use crate::storage::HistoryStore;

pub struct ChatOrchestrator {
    store: Arc<dyn HistoryStore>,
    client: Arc<dyn CompletionClient>,
}

impl ChatOrchestrator {
    pub fn new(store: Arc<dyn HistoryStore>, client: Arc<dyn CompletionClient>) -> Self {
        Self { store, client }
    }

    /// Run one chat turn for `user_id` and return the assistant's reply.
    pub async fn handle(
        &self,
        user_id: &str,
        message: &str,
        language: &str,
    ) -> Result<ChatTurn, ChatError> {
        let mut history = self
            .store
            .find_by_user(user_id)
            .await
            .map_err(ChatError::Persistence)?
            .unwrap_or_else(|| ConversationHistory::new(user_id));

        // Window over the history as persisted; the new input rides along
        // separately so it is never counted twice.
        let window = context::assemble(&history.messages, message, language);

        tracing::debug!(
            "[ChatOrchestrator] Submitting {} messages for user '{}'",
            window.len(),
            user_id
        );

        let response = self.client.complete(&window).await?;

        history.push(ChatMessage::user(message));
        let reply = ChatMessage::assistant(response.clone());
        let timestamp = reply.timestamp;
        history.push(reply);

        if let Err(e) = self.store.save(&history).await {
            // The reply was generated but could not be recorded. Keep the
            // text in the logs so the inconsistency window is visible.
            tracing::warn!(
                "[ChatOrchestrator] Reply for user '{}' was generated but not saved: {}",
                user_id,
                e
            );
            return Err(ChatError::Persistence(e));
        }

        tracing::info!(
            "[ChatOrchestrator] Completed turn for user '{}' ({} messages in history)",
            user_id,
            history.messages.len()
        );

        Ok(ChatTurn {
            response,
            timestamp,
        })
    }

    /// The full persisted history, or an empty record if none exists.
    /// Read-only; absent histories are not created by this call.
    pub async fn history(&self, user_id: &str) -> Result<ConversationHistory, ChatError> {
        Ok(self
            .store
            .find_by_user(user_id)
            .await
            .map_err(ChatError::Persistence)?
            .unwrap_or_else(|| ConversationHistory::new(user_id)))
    }

    /// Delete the caller's conversation record. Clearing an absent or
    /// already-empty history succeeds silently.
    pub async fn clear_history(&self, user_id: &str) -> Result<(), ChatError> {
        self.store
            .delete_by_user(user_id)
            .await
            .map_err(ChatError::Persistence)
    }
}
