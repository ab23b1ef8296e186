/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds with a tagged translation
 * - `MockProvider::intermittent(n)` - Fails every nth request
 * - `MockProvider::failing()` - Always fails with a server error
 * - `MockProvider::empty()` - Returns an empty response body
 * - `MockProvider::untagged()` - Returns text without the step tags
 */

// Allow dead code - the mock provider is test infrastructure
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// The text to translate
    pub text: String,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The raw response body
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a properly tagged three-step response
    Working,
    /// Fails intermittently (every nth request) with a retryable error
    Intermittent {
        /// Every nth request fails
        fail_every: usize,
    },
    /// Always fails with a server error
    Failing,
    /// Always fails with a non-retryable authentication error
    FailingFatal,
    /// Returns an empty response body
    Empty,
    /// Returns a response with no step tags at all
    Untagged,
    /// Simulates a slow response (for timeout testing)
    Slow {
        /// Delay before answering, in milliseconds
        delay_ms: u64,
    },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared across clones
    request_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails with a non-retryable error
    pub fn failing_fatal() -> Self {
        Self::new(MockBehavior::FailingFatal)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock whose responses lack the refined-translation tags
    pub fn untagged() -> Self {
        Self::new(MockBehavior::Untagged)
    }

    /// Number of requests this provider (and its clones) has seen
    pub fn requests_seen(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Generate a response body in the three-step format real providers use
    pub fn generate_refined_response(translated: &str) -> String {
        format!(
            "<step1_initial_translation>\n{translated}\n</step1_initial_translation>\n\
             <step2_reflection>\nNo changes needed.\n</step2_reflection>\n\
             <step3_refined_translation>\n{translated}\n</step3_refined_translation>"
        )
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: MockRequest) -> Result<MockResponse, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(MockResponse {
                text: Self::generate_refined_response(&format!("[翻译] {}", request.text)),
            }),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(MockResponse {
                        text: Self::generate_refined_response(&format!("[翻译] {}", request.text)),
                    })
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::FailingFatal => Err(ProviderError::AuthenticationError(
                "Simulated invalid API key".to_string(),
            )),

            MockBehavior::Empty => Ok(MockResponse {
                text: String::new(),
            }),

            MockBehavior::Untagged => Ok(MockResponse {
                text: format!("[翻译] {}", request.text),
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(MockResponse {
                    text: Self::generate_refined_response(&format!("[翻译] {}", request.text)),
                })
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.complete(MockRequest {
            text: "Hello".to_string(),
        })
        .await?;
        Ok(())
    }

    fn extract_text(response: &MockResponse) -> String {
        response.text.clone()
    }
}
