//! Veracity LLM Provider Layer
//!
//! Pluggable implementations of the `LlmProvider` trait from `veracity-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Scripted responses for testing
//! - `OllamaProvider`: Local Ollama chat API
//! - `ChatCompletionsProvider`: OpenAI-compatible chat completions (Groq, OpenAI, vLLM)
//! - `AnyProvider`: Runtime selection between the above from an `LlmConfig`
//!
//! # Examples
//!
//! ```
//! use veracity_llm::MockProvider;
//! use veracity_domain::{CompletionRequest, LlmProvider};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let request = CompletionRequest::new("system", "test prompt", 100);
//! let result = provider.complete(&request).await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;
use veracity_domain::{CompletionRequest, LlmProvider};

pub use config::{LlmConfig, ProviderKind};
pub use ollama::OllamaProvider;
pub use openai::ChatCompletionsProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider misconfigured (missing key, bad endpoint)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether a retry could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Communication(_) | LlmError::RateLimitExceeded)
    }
}

/// Run `attempt` up to `max_attempts` times, backing off 1s, 2s, 4s, ...
/// between transient failures.
pub(crate) async fn with_retries<F, Fut>(max_attempts: u32, mut attempt: F) -> Result<String, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, LlmError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;

    loop {
        match attempt().await {
            Ok(text) => return Ok(text),
            Err(e) => {
                attempts += 1;
                if !e.is_transient() || attempts >= max_attempts {
                    return Err(e);
                }
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tracing::warn!("LLM call failed ({}), retrying in {:?}", e, delay);
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// A scripted reply
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

#[derive(Debug, Default)]
struct MockState {
    rules: Vec<(String, MockReply)>,
    queue: VecDeque<MockReply>,
    requests: Vec<CompletionRequest>,
}

/// Mock LLM provider for deterministic testing
///
/// Resolution order for each call: the next queued reply (if any), then
/// the first rule whose key occurs in the prompt, then the default
/// response. No network calls are made.
///
/// # Examples
///
/// ```
/// use veracity_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("Nature journal", "[]");
/// provider.add_error("unreachable");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    model: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            model: "mock-model".to_string(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Create a MockProvider whose every call fails
    pub fn failing(message: impl Into<String>) -> Self {
        let provider = Self::default();
        provider
            .state()
            .rules
            .push((String::new(), MockReply::Error(message.into())));
        provider
    }

    /// Set the reported model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Respond with `response` whenever the prompt contains `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.state()
            .rules
            .push((needle.into(), MockReply::Text(response.into())));
    }

    /// Fail whenever the prompt contains `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        self.state()
            .rules
            .push((needle.into(), MockReply::Error("Mock error".to_string())));
    }

    /// Queue a response consumed by the next call, ahead of any rule
    pub fn push_response(&self, response: impl Into<String>) {
        self.state().queue.push_back(MockReply::Text(response.into()));
    }

    /// Queue a failure consumed by the next call
    pub fn push_error(&self, message: impl Into<String>) {
        self.state().queue.push_back(MockReply::Error(message.into()));
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.state().requests.clone()
    }

    /// Forget recorded requests
    pub fn reset_call_count(&self) {
        self.state().requests.clear();
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        let mut state = self.state();
        state.requests.push(request.clone());

        let reply = match state.queue.pop_front() {
            Some(reply) => reply,
            None => state
                .rules
                .iter()
                .find(|(needle, _)| request.prompt.contains(needle.as_str()))
                .map(|(_, reply)| reply.clone())
                .unwrap_or_else(|| MockReply::Text(self.default_response.clone())),
        };

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(message) => Err(LlmError::Other(message)),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Provider chosen at runtime from configuration
pub enum AnyProvider {
    /// Local Ollama
    Ollama(OllamaProvider),
    /// OpenAI-compatible endpoint
    ChatCompletions(ChatCompletionsProvider),
    /// Scripted responses
    Mock(MockProvider),
}

impl AnyProvider {
    /// Build the configured provider for `model`
    pub fn from_config(config: &LlmConfig, model: &str) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Config)?;

        let provider = match config.provider {
            ProviderKind::Ollama => AnyProvider::Ollama(
                OllamaProvider::new(&config.endpoint, model, config.timeout())?
                    .with_max_retries(config.max_retries),
            ),
            ProviderKind::OpenAi => {
                let api_key = config
                    .api_key
                    .clone()
                    .ok_or_else(|| LlmError::Config("api_key is required for the openai provider".to_string()))?;
                AnyProvider::ChatCompletions(
                    ChatCompletionsProvider::new(&config.endpoint, api_key, model, config.timeout())?
                        .with_max_retries(config.max_retries),
                )
            }
            ProviderKind::Mock => AnyProvider::Mock(MockProvider::new("[]").with_model(model)),
        };

        Ok(provider)
    }
}

#[async_trait]
impl LlmProvider for AnyProvider {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        match self {
            AnyProvider::Ollama(p) => p.complete(request).await,
            AnyProvider::ChatCompletions(p) => p.complete(request).await,
            AnyProvider::Mock(p) => p.complete(request).await,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            AnyProvider::Ollama(p) => p.model_name(),
            AnyProvider::ChatCompletions(p) => p.model_name(),
            AnyProvider::Mock(p) => p.model_name(),
        }
    }
}
