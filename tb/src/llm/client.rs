//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless completion client - each call is independent
///
/// The remote strategy holds this as a trait object so tests can swap in
/// a scripted client. Implementations carry configuration only, never
/// per-task state, and must be safe to share across concurrent
/// breakdowns.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request, waiting for the full response.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Mock LLM client for unit tests - replays a scripted sequence of
    /// outcomes and errors once the script runs out.
    pub struct MockLlmClient {
        script: Mutex<Vec<Result<CompletionResponse, LlmError>>>,
        call_count: AtomicUsize,
    }

    impl MockLlmClient {
        pub fn new(script: Vec<Result<CompletionResponse, LlmError>>) -> Self {
            Self {
                script: Mutex::new(script),
                call_count: AtomicUsize::new(0),
            }
        }

        /// A client that returns the given content once.
        pub fn with_content(content: &str) -> Self {
            Self::new(vec![Ok(CompletionResponse {
                content: Some(content.to_string()),
            })])
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .expect("mock script lock")
                .get(idx)
                .cloned()
                .unwrap_or_else(|| Err(LlmError::InvalidResponse("no more mock responses".to_string())))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_replays_script() {
            let client = MockLlmClient::new(vec![
                Ok(CompletionResponse {
                    content: Some("first".to_string()),
                }),
                Err(LlmError::Network("down".to_string())),
            ]);

            let request = CompletionRequest {
                system_prompt: "Test".to_string(),
                messages: vec![],
                max_tokens: 100,
            };

            let first = client.complete(request.clone()).await.unwrap();
            assert_eq!(first.content.as_deref(), Some("first"));

            let second = client.complete(request.clone()).await;
            assert!(matches!(second, Err(LlmError::Network(_))));

            let third = client.complete(request).await;
            assert!(matches!(third, Err(LlmError::InvalidResponse(_))));

            assert_eq!(client.call_count(), 3);
        }
    }
}
