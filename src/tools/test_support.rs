//! Scripted AI collaborator for tool tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::ai::{AiError, CompletionClient, CompletionRequest};

/// Replies with a fixed text, or a rate-limit error when `reply` is `None`
pub struct ScriptedClient {
    reply: Option<String>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn rate_limited() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().ok_or(AiError::RateLimited)
    }
}
