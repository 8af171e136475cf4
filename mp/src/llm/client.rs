//! GenerateClient trait definition

use async_trait::async_trait;

use super::LlmError;

/// A single structured-output generation request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Natural-language prompt describing the scheduling constraints
    pub prompt: String,
    /// JSON schema the response is expected to match
    pub response_schema: serde_json::Value,
}

/// Stateless generation client - each call is independent
///
/// One request per user action, not cancellable, not retried. The returned
/// string is the raw JSON text; shape validation happens downstream.
#[async_trait]
pub trait GenerateClient: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<String, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Mock generation client for unit tests
    pub struct MockClient {
        responses: Vec<String>,
        call_count: AtomicUsize,
    }

    impl MockClient {
        pub fn new(responses: Vec<String>) -> Self {
            debug!(response_count = %responses.len(), "MockClient::new: called");
            Self {
                responses,
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerateClient for MockClient {
        async fn generate(&self, _request: GenerateRequest) -> Result<String, LlmError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(idx)
                .cloned()
                .ok_or_else(|| LlmError::InvalidResponse("No more mock responses".to_string()))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_returns_responses_in_order() {
            let client = MockClient::new(vec!["[]".to_string(), "[1]".to_string()]);
            let req = GenerateRequest {
                prompt: "Test".to_string(),
                response_schema: serde_json::json!({}),
            };

            assert_eq!(client.generate(req.clone()).await.unwrap(), "[]");
            assert_eq!(client.generate(req.clone()).await.unwrap(), "[1]");
            assert_eq!(client.call_count(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockClient::new(vec![]);
            let req = GenerateRequest {
                prompt: "Test".to_string(),
                response_schema: serde_json::json!({}),
            };

            assert!(client.generate(req).await.is_err());
        }
    }
}
