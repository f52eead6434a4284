//! Configuration for evidence retrieval

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Browser-like User-Agent sent to the HTML backend
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Configuration for the EvidenceRetriever and its backends
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Prefer the free DuckDuckGo backend even when API keys are present
    pub use_free_search: bool,

    /// SerpAPI key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serpapi_api_key: Option<String>,

    /// Google Custom Search API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,

    /// Google Custom Search engine id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_cse_id: Option<String>,

    /// Results kept per query
    pub max_results_per_query: usize,

    /// Outbound search calls allowed in flight at once
    pub max_concurrent_searches: usize,

    /// Per-search timeout (seconds)
    pub search_timeout_secs: u64,

    /// User-Agent header for outbound requests
    pub user_agent: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            use_free_search: true,
            serpapi_api_key: None,
            google_api_key: None,
            google_cse_id: None,
            max_results_per_query: 5,
            max_concurrent_searches: 3,
            search_timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl RetrievalConfig {
    /// Get the search timeout as a Duration
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_results_per_query == 0 {
            return Err("max_results_per_query must be greater than 0".to_string());
        }
        if self.max_concurrent_searches == 0 {
            return Err("max_concurrent_searches must be greater than 0".to_string());
        }
        if self.search_timeout_secs == 0 {
            return Err("search_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
