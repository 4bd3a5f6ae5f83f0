//! HTTP surface.
//!
//! A thin axum layer over the chat orchestrator. Authentication happens
//! upstream; this service only reads the forwarded caller identity (see
//! [`auth`]) and maps classified chat errors onto HTTP responses.

mod auth;
mod error;
mod routes;

pub use auth::UserId;
pub use error::ApiError;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::core::chat::ChatOrchestrator;

pub struct AppState {
    pub orchestrator: ChatOrchestrator,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat/message", post(routes::post_message))
        .route(
            "/chat/history",
            get(routes::get_history).delete(routes::delete_history),
        )
        .route("/health", get(routes::get_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, bind: &str) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .context(format!("Failed to bind {}", bind))?;

    tracing::info!("[Server] Listening on {}", bind);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
