//! Route handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::auth::UserId;
use super::error::ApiError;
use super::AppState;
use crate::core::types::{ChatTurn, ConversationHistory};

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "English".to_string()
}

pub async fn post_message(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Json(body): Json<MessageRequest>,
) -> Result<Json<ChatTurn>, ApiError> {
    if body.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    tracing::info!("[Server] Received message from user '{}'", user_id);

    let turn = state
        .orchestrator
        .handle(&user_id, &body.message, &body.language)
        .await?;

    Ok(Json(turn))
}

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
) -> Result<Json<ConversationHistory>, ApiError> {
    let history = state.orchestrator.history(&user_id).await?;
    Ok(Json(history))
}

pub async fn delete_history(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
) -> Result<Json<Value>, ApiError> {
    state.orchestrator.clear_history(&user_id).await?;
    Ok(Json(json!({ "message": "Chat history cleared" })))
}

pub async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
