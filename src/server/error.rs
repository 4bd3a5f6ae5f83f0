//! HTTP error mapping.
//!
//! Handlers return `Result<T, ApiError>`; the conversion to a response
//! keeps internal detail in the logs and puts only the classified
//! user-facing message on the wire, under the `message` key the chat
//! clients expect.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::core::completion::CompletionError;
use crate::error::ChatError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No caller identity was forwarded by the upstream middleware.
    #[error("missing caller identity")]
    Unauthorized,

    /// The request body was malformed or empty.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A classified failure from the chat core.
    #[error(transparent)]
    Chat(#[from] ChatError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Missing caller identity".to_string(),
            ),
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ApiError::Chat(e) => {
                error!(error = %e, "chat request failed");
                let status = match e {
                    ChatError::Completion(CompletionError::RateLimited)
                    | ChatError::Completion(CompletionError::QuotaExceeded) => {
                        StatusCode::TOO_MANY_REQUESTS
                    }
                    ChatError::Completion(CompletionError::Authentication)
                    | ChatError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    ChatError::Completion(_) => StatusCode::BAD_GATEWAY,
                };
                (status, e.user_message().to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
