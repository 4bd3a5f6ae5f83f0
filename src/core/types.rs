//! Data model for conversations.
//!
//! Messages are append-only: a `ConversationHistory` grows by exactly one
//! user message and one assistant message per successful turn and is never
//! edited or reordered. Insertion order is chronological and is the only
//! ordering the prompt window relies on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a chat message.
///
/// The set is closed. Records read from storage carrying any other role
/// tag fail deserialization instead of being coerced to `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single exchanged message, immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Durable per-user conversation record.
///
/// Owned exclusively by one user identity; created lazily on the first
/// message and deleted only by an explicit clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationHistory {
    pub user_id: String,
    pub messages: Vec<ChatMessage>,
}

impl ConversationHistory {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Result of one successful chat turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_serde() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result = serde_json::from_str::<ChatMessage>(
            r#"{"role":"system","content":"x","timestamp":"2024-01-01T00:00:00Z"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn history_starts_empty() {
        let history = ConversationHistory::new("user-1");
        assert_eq!(history.user_id, "user-1");
        assert!(history.is_empty());
    }
}
