//! Chat-completions API client
//!
//! Sends a single POST to a chat-completions endpoint in JSON-output mode,
//! with bounded, strictly sequential retries on transient failures. Only
//! 5xx responses and network-level failures are retried; 4xx responses
//! are terminal and surface immediately.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::transport::{HttpTransport, ReqwestTransport};
use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError};
use crate::config::ResolvedLlmConfig;

/// Backoff before the first retry; doubles on each subsequent retry.
const INITIAL_BACKOFF: Duration = Duration::from_secs(2);

/// Chat-completions client
pub struct OpenAiClient {
    model: String,
    api_key: String,
    base_url: String,
    max_retries: u32,
    max_tokens: u32,
    transport: Box<dyn HttpTransport>,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Create a client from resolved configuration.
    ///
    /// Fails when the configuration carries no usable credential.
    pub fn from_config(config: &ResolvedLlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, "from_config: called");
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Configuration(
                "API key is empty; the remote strategy cannot be used without credentials".to_string(),
            ));
        }

        let transport = ReqwestTransport::new(config.timeout)?;

        Ok(Self {
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            max_tokens: config.max_tokens,
            transport: Box::new(transport),
        })
    }

    /// Backoff before retry `attempt` (1-based): 2s, 4s, 8s, ...
    fn backoff_delay(attempt: u32) -> Duration {
        INITIAL_BACKOFF * 2u32.pow(attempt.saturating_sub(1))
    }

    /// Build the request body in the chat-completions wire format.
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(%self.model, request.max_tokens, "build_request_body: called");
        let mut messages = vec![serde_json::json!({
            "role": "system",
            "content": request.system_prompt,
        })];

        for msg in &request.messages {
            messages.push(serde_json::json!({
                "role": msg.role,
                "content": msg.content,
            }));
        }

        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": request.max_tokens.min(self.max_tokens),
            "response_format": { "type": "json_object" },
        })
    }

    /// Parse the response envelope down to the first choice's content.
    fn parse_response(&self, body: &str) -> Result<CompletionResponse, LlmError> {
        let api_response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| LlmError::InvalidResponse(format!("unparseable response body: {}", e)))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        Ok(CompletionResponse { content })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, "complete: called");
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request_body(&request);

        let mut last_error = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = Self::backoff_delay(attempt);
                warn!(
                    attempt,
                    backoff_secs = backoff.as_secs(),
                    "complete: retrying after transient error"
                );
                tokio::time::sleep(backoff).await;
            }

            let response = match self.transport.post_json(&url, &self.api_key, &body).await {
                Ok(r) => r,
                Err(error) => {
                    debug!(attempt, %error, "complete: network error");
                    if !error.is_retryable() {
                        return Err(error);
                    }
                    last_error = Some(error);
                    continue;
                }
            };

            if response.is_success() {
                debug!(attempt, "complete: success");
                return self.parse_response(&response.body);
            }

            let error = LlmError::from_status(response.status, response.body);
            if error.is_retryable() && attempt < self.max_retries {
                debug!(attempt, status = response.status, "complete: retryable error");
                last_error = Some(error);
                continue;
            }

            debug!(status = response.status, "complete: terminal error");
            return Err(error);
        }

        Err(last_error.unwrap_or_else(|| LlmError::InvalidResponse("retry budget exhausted".to_string())))
    }
}

// Chat-completions response envelope

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
