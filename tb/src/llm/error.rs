//! LLM error types

use thiserror::Error;

/// Errors that can occur while calling the completion service
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// A required credential or setting is missing
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The service rejected the credential (401/403)
    #[error("authentication rejected ({status}): {message}")]
    Auth { status: u16, message: String },

    /// The service is rate limiting this client (429)
    #[error("rate limited ({status}): {message}")]
    RateLimited { status: u16, message: String },

    /// Any other HTTP error response
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced an HTTP response
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected envelope
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Transport failures worth retrying: 5xx responses and requests that
    /// never got a response at all. Everything else is terminal.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Api { status, .. } => *status >= 500,
            LlmError::Network(_) => true,
            LlmError::Configuration(_)
            | LlmError::Auth { .. }
            | LlmError::RateLimited { .. }
            | LlmError::InvalidResponse(_) => false,
        }
    }

    /// Classify an HTTP error status into the matching variant.
    ///
    /// Auth-like and rate-limit failures get their own variants so the
    /// CLI can render them legibly.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => LlmError::Auth { status, message },
            429 => LlmError::RateLimited { status, message },
            _ => LlmError::Api { status, message },
        }
    }
}
