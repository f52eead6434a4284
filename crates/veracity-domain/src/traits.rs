//! Trait definitions for external interactions
//!
//! These traits define the boundaries between pipeline logic and
//! infrastructure. Implementations live in other crates (veracity-llm).

use async_trait::async_trait;

/// A single chat-style completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction
    pub system: String,

    /// User prompt
    pub prompt: String,

    /// Sampling temperature (0.0 for deterministic output)
    pub temperature: f32,

    /// Response token ceiling
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Create a deterministic request (temperature 0)
    pub fn new(system: impl Into<String>, prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature: 0.0,
            max_tokens,
        }
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (veracity-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::fmt::Display + Send;

    /// Generate a completion for the request
    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error>;

    /// Identifier of the model answering requests
    fn model_name(&self) -> &str;
}
