//! HTTP transport seam for the completion client
//!
//! The retry policy in [`super::OpenAiClient`] is written against this
//! trait so tests can drive it with a scripted transport instead of a
//! live server.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::LlmError;

/// Raw HTTP response: status code plus body text
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal POST-JSON transport
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST a JSON body with a bearer credential.
    ///
    /// Returns the response for any HTTP status, or
    /// [`LlmError::Network`] when no response arrived at all - the
    /// distinction drives the retry policy.
    async fn post_json(
        &self,
        url: &str,
        bearer_token: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, LlmError>;
}

/// reqwest-backed transport with a fixed per-attempt timeout
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Network(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        bearer_token: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, LlmError> {
        debug!(%url, "post_json: sending request");
        let response = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", bearer_token))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        debug!(status, "post_json: response received");

        Ok(TransportResponse { status, body })
    }
}
