//! Error types for the classifier

use thiserror::Error;

/// Reasons a classification attempt produced no usable result
///
/// `ClaimClassifier::filter` never returns these; they select the
/// fail-open path and are logged.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// LLM call exceeded the configured timeout
    #[error("Classification timeout")]
    Timeout,

    /// Response contained no `[ ... ]` span
    #[error("No JSON array found in response")]
    NoJsonArray,

    /// JSON parsing or schema validation error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for ClassifierError {
    fn from(e: serde_json::Error) -> Self {
        ClassifierError::JsonParse(e.to_string())
    }
}
