//! Request-level error taxonomy surfaced by the chat orchestrator.
//!
//! Every failure a chat turn can hit is classified here and carries a
//! user-facing message. Nothing is retried, and remote errors are never
//! masked with fabricated successful-looking responses.

use thiserror::Error;

use crate::core::completion::CompletionError;

#[derive(Debug, Error)]
pub enum ChatError {
    /// The completion endpoint failed; the inner error says how.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// The history store was unavailable. When this happens after a
    /// successful completion the generated reply is lost from history
    /// even though it was produced; callers get this surfaced rather
    /// than a silent success.
    #[error("history store unavailable: {0}")]
    Persistence(anyhow::Error),
}

impl ChatError {
    /// Message suitable for showing to the end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ChatError::Completion(CompletionError::Authentication) => {
                "The completion API key is invalid. Please check the server configuration."
            }
            ChatError::Completion(CompletionError::RateLimited) => {
                "Rate limit exceeded. Please wait a moment and try again."
            }
            ChatError::Completion(CompletionError::QuotaExceeded) => "API quota exceeded.",
            ChatError::Completion(_) => "Sorry, I encountered an error. Please try again.",
            ChatError::Persistence(_) => {
                "Your conversation could not be saved. Please try again."
            }
        }
    }
}
