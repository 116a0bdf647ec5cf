//! Mock text generator for testing.
//!
//! Configurable queue of canned completions and injected errors, with call
//! recording so tests can assert what the pipeline sent upstream.
//!
//! # Example
//!
//! ```ignore
//! let generator = MockGenerator::new()
//!     .with_completion(r#"{"technotype":"Tester","description":"Writes tests."}"#);
//!
//! let text = generator.generate(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{GenerationError, GenerationRequest, TextGenerator};

/// Mock errors, cloneable so they can sit in the response queue.
#[derive(Debug, Clone)]
pub enum MockFailure {
    /// Simulate an authentication failure.
    AuthenticationFailed,
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate a network error.
    Network { message: String },
    /// Simulate a timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockFailure> for GenerationError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::AuthenticationFailed => GenerationError::AuthenticationFailed,
            MockFailure::RateLimited { retry_after_secs } => {
                GenerationError::RateLimited { retry_after_secs }
            }
            MockFailure::Unavailable { message } => GenerationError::Unavailable { message },
            MockFailure::Network { message } => GenerationError::Network(message),
            MockFailure::Timeout { timeout_secs } => GenerationError::Timeout { timeout_secs },
        }
    }
}

/// Mock generator with queued responses (consumed in order).
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    responses: Arc<Mutex<VecDeque<Result<String, MockFailure>>>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockGenerator {
    /// Creates a new mock generator with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful completion.
    pub fn with_completion(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(content.into()));
        self
    }

    /// Queues a failure.
    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.responses.lock().unwrap().push_back(Err(failure));
        self
    }

    /// Returns the number of generation calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded requests.
    pub fn recorded_calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<String, MockFailure> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Mock completion".to_string()))
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(request);
        self.next_response().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_queued_completions_in_order() {
        let generator = MockGenerator::new()
            .with_completion("first")
            .with_completion("second");

        let r1 = generator.generate(GenerationRequest::new("a")).await.unwrap();
        let r2 = generator.generate(GenerationRequest::new("b")).await.unwrap();

        assert_eq!(r1, "first");
        assert_eq!(r2, "second");
    }

    #[tokio::test]
    async fn returns_default_after_queue_exhausted() {
        let generator = MockGenerator::new();
        let text = generator.generate(GenerationRequest::new("a")).await.unwrap();
        assert_eq!(text, "Mock completion");
    }

    #[tokio::test]
    async fn returns_queued_failure() {
        let generator = MockGenerator::new().with_failure(MockFailure::AuthenticationFailed);
        let result = generator.generate(GenerationRequest::new("a")).await;
        assert!(matches!(result, Err(GenerationError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn records_calls() {
        let generator = MockGenerator::new().with_completion("ok");
        assert_eq!(generator.call_count(), 0);

        generator
            .generate(GenerationRequest::new("the prompt").with_json_output())
            .await
            .unwrap();

        assert_eq!(generator.call_count(), 1);
        let calls = generator.recorded_calls();
        assert_eq!(calls[0].prompt, "the prompt");
        assert!(calls[0].json_output);
    }
}
