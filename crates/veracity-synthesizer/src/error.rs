//! Error types for the synthesizer

use thiserror::Error;

/// Reasons a single claim could not be synthesized
#[derive(Error, Debug)]
pub enum SynthesizerError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// LLM call exceeded the configured timeout
    #[error("Verification timeout")]
    Timeout,

    /// Response contained no `{ ... }` span
    #[error("No JSON object found in response")]
    NoJsonObject,

    /// JSON parsing or schema error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Response parsed but violated a field constraint
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<serde_json::Error> for SynthesizerError {
    fn from(e: serde_json::Error) -> Self {
        SynthesizerError::JsonParse(e.to_string())
    }
}
