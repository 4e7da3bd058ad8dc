//! AI gateway client
//!
//! Speaks the OpenAI-compatible chat-completions protocol. Configuration is
//! handed in at construction; nothing here reads the environment.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::AiConfig;

/// AI collaborator error types
#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI gateway API key is not configured")]
    NotConfigured,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("AI credits depleted. Please add credits in settings.")]
    CreditsDepleted,

    #[error("AI gateway error: {status}")]
    Gateway { status: u16, body: String },

    #[error("AI gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid AI gateway response: {0}")]
    InvalidResponse(String),
}

/// A single system + user prompt exchange
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
}

/// Text-completion collaborator
///
/// Returns the raw assistant text; callers treat it as untrusted.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// HTTP client for the configured AI gateway
pub struct GatewayClient {
    config: AiConfig,
    http: Client,
}

impl GatewayClient {
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, http })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionClient for GatewayClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        let api_key = self.config.api_key.as_deref().ok_or(AiError::NotConfigured)?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage { role: "system", content: &request.system_prompt },
                ChatMessage { role: "user", content: &request.user_prompt },
            ],
            temperature: request.temperature,
        };

        debug!(model = %self.config.model, "Sending chat completion request");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach AI gateway: {}", e);
                AiError::Transport(e)
            })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "AI gateway returned an error");
            return Err(error_for_status(status, &text));
        }

        let content = content_from_body(&text)?;
        debug!("Received {} chars from AI gateway", content.len());
        Ok(content)
    }
}

/// Map a non-success gateway status to an error
fn error_for_status(status: StatusCode, body: &str) -> AiError {
    match status.as_u16() {
        429 => AiError::RateLimited,
        402 => AiError::CreditsDepleted,
        code => AiError::Gateway {
            status: code,
            body: body.chars().take(500).collect(),
        },
    }
}

/// Pull the first choice's message text out of a completion body
///
/// A reply without choices or content yields an empty string; the
/// normalizers then report that no JSON object was found.
fn content_from_body(body: &str) -> Result<String, AiError> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| AiError::InvalidResponse(e.to_string()))?;

    Ok(response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .unwrap_or_default())
}
