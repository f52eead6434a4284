//! Error types for search backends

use thiserror::Error;

/// Errors raised by a single search call
///
/// These never escape `EvidenceRetriever::fetch`; they are logged and the
/// failed query contributes no evidence.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Backend answered with a non-success status
    #[error("HTTP {status} from {backend}")]
    Http {
        /// Backend name
        backend: String,
        /// Response status code
        status: u16,
    },

    /// Request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    Request(String),

    /// Response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Call exceeded the per-search timeout
    #[error("Search timed out")]
    Timeout,

    /// Backend misconfigured
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for SearchError {
    fn from(e: serde_json::Error) -> Self {
        SearchError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SearchError::Timeout
        } else {
            SearchError::Request(e.to_string())
        }
    }
}
