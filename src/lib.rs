//! Medichat - medical symptom chat backed by a hosted LLM completion API.
//!
//! The behavioral core is the conversation context manager: [`storage`]
//! persists per-user history, [`core::context`] assembles the bounded
//! prompt window, [`core::completion`] adapts the remote completion
//! endpoint, and [`core::chat`] orchestrates one turn and classifies
//! failures. The HTTP surface in [`server`] and the CLI in [`cli`] are
//! thin layers over the orchestrator.

pub mod cli;
mod config;
pub mod core;
pub mod error;
pub mod server;
pub mod storage;
pub mod utils;

pub use crate::config::{LlmSettings, Settings};
pub use crate::core::chat::ChatOrchestrator;
pub use crate::core::completion::{CompletionClient, CompletionError, GroqClient, PromptMessage};
pub use crate::core::context::HISTORY_WINDOW;
pub use crate::core::types::{ChatMessage, ChatTurn, ConversationHistory, Role};
pub use crate::error::ChatError;
pub use crate::storage::HistoryStore;
