//! Strategy error types

use thiserror::Error;

use crate::llm::LlmError;

/// Errors produced while turning a task into a breakdown
///
/// All variants propagate through the orchestrator unchanged; only the
/// CLI layer renders them.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The strategy cannot be constructed with the given configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport-level failure talking to the completion service
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The model reply could not be coerced into the expected step shape
    #[error("malformed model response: {0}")]
    ResponseShape(String),

    /// The model reply parsed cleanly but contained zero steps
    #[error("model returned an empty step list")]
    EmptyResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_converts_transparently() {
        let err: StrategyError = LlmError::Network("connection refused".to_string()).into();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_response_shape_message() {
        let err = StrategyError::ResponseShape("reply has no \"steps\" array".to_string());
        assert!(err.to_string().contains("malformed"));
    }
}
