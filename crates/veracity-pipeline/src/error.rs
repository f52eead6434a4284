//! Error types for pipeline construction

use thiserror::Error;
use veracity_llm::LlmError;
use veracity_retrieval::SearchError;

/// Errors raised while building a pipeline
///
/// Running a built pipeline never fails.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// LLM provider could not be built
    #[error("LLM provider error: {0}")]
    Llm(#[from] LlmError),

    /// Search backend could not be built
    #[error("Search backend error: {0}")]
    Search(#[from] SearchError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
