//! Adapter for the hosted chat-completion endpoint.
//!
//! The remote service is treated as an unreliable dependency: one request
//! per turn, no retries, and every failure is surfaced to the caller as a
//! classified [`CompletionError`] for the orchestrator to translate.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LlmSettings;
use crate::core::types::{ChatMessage, Role};

/// One entry of the prompt window, in the wire shape the completion
/// endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptMessage {
    pub role: &'static str,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant",
            content: content.into(),
        }
    }

    pub fn from_history(message: &ChatMessage) -> Self {
        match message.role {
            Role::User => Self::user(message.content.clone()),
            Role::Assistant => Self::assistant(message.content.clone()),
        }
    }
}

/// Classified failure from the completion endpoint.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion API rejected the credentials")]
    Authentication,

    #[error("completion API is throttling requests")]
    RateLimited,

    #[error("completion API quota exhausted")]
    QuotaExceeded,

    #[error("completion API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion response contained no choices")]
    EmptyResponse,
}

/// Collaborator seam for the external completion service.
///
/// Constructor-injected into the orchestrator so tests can substitute a
/// double for the remote endpoint.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Submit the assembled prompt window and return the single best
    /// completion text. One attempt; failures come back classified.
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Error body shape used by OpenAI-compatible endpoints.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: ApiErrorDetail,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// Client for Groq's OpenAI-compatible `/chat/completions` endpoint.
pub struct GroqClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

impl GroqClient {
    pub fn new(settings: &LlmSettings, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            top_p: settings.top_p,
        }
    }

    fn classify(status: StatusCode, body: &str) -> CompletionError {
        let detail = serde_json::from_str::<ApiErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Authentication,
            StatusCode::TOO_MANY_REQUESTS => {
                let code = detail.code.or(detail.kind).unwrap_or_default();
                if code.contains("quota") {
                    CompletionError::QuotaExceeded
                } else {
                    CompletionError::RateLimited
                }
            }
            _ => CompletionError::Api {
                status: status.as_u16(),
                message: if detail.message.is_empty() {
                    body.trim().to_string()
                } else {
                    detail.message
                },
            },
        }
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "[GroqClient] API returned error status {}: {}",
                status,
                body
            );
            return Err(Self::classify(status, &body));
        }

        let completion: ChatResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String) -> GroqClient {
        let settings = LlmSettings {
            base_url,
            model: "test-model".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
            top_p: 1.0,
        };
        GroqClient::new(&settings, "test-key".to_string())
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "max_tokens": 1024,
                "top_p": 1.0,
                "stream": false,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "Drink fluids and rest." } }
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let reply = client
            .complete(&[PromptMessage::user("I have a fever")])
            .await
            .unwrap();

        assert_eq!(reply, "Drink fluids and rest.");
    }

    #[tokio::test]
    async fn unauthorized_is_classified_as_authentication() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Invalid API Key", "type": "invalid_request_error" }
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client
            .complete(&[PromptMessage::user("hello")])
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::Authentication));
    }

    #[tokio::test]
    async fn throttling_is_classified_as_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "message": "Rate limit reached", "code": "rate_limit_exceeded" }
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client
            .complete(&[PromptMessage::user("hello")])
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::RateLimited));
    }

    #[tokio::test]
    async fn exhausted_quota_is_classified_as_quota() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "message": "You exceeded your current quota", "code": "insufficient_quota" }
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client
            .complete(&[PromptMessage::user("hello")])
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::QuotaExceeded));
    }

    #[tokio::test]
    async fn server_error_is_unclassified() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client
            .complete(&[PromptMessage::user("hello")])
            .await
            .unwrap_err();

        match err {
            CompletionError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client
            .complete(&[PromptMessage::user("hello")])
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::EmptyResponse));
    }
}
