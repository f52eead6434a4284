//! Search backend abstraction and selection

use crate::config::RetrievalConfig;
use crate::error::SearchError;
use crate::{DuckDuckGoBackend, GoogleCseBackend, SerpApiBackend};
use async_trait::async_trait;
use std::sync::Arc;

/// Relevance assigned to every hit; no backend ranks its results
pub const DEFAULT_RELEVANCE: f64 = 0.5;

/// A raw search result before reputation annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Destination URL
    pub url: String,
    /// Display title (empty if absent)
    pub title: String,
    /// Result snippet (empty if absent)
    pub snippet: String,
    /// Publication date, when the backend reports one
    pub published_at: Option<String>,
}

impl SearchHit {
    /// Create a hit without a publication date
    pub fn new(url: impl Into<String>, title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            snippet: snippet.into(),
            published_at: None,
        }
    }
}

/// A web search service
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Run one query, returning at most `max_results` hits
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError>;
}

/// Which backend the configuration resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// DuckDuckGo HTML scraping
    DuckDuckGo,
    /// SerpAPI
    SerpApi,
    /// Google Custom Search
    GoogleCse,
}

impl BackendKind {
    /// Resolve the static priority: free search if enabled, else SerpAPI if
    /// keyed, else Google CSE if keyed, else free search again
    pub fn select(config: &RetrievalConfig) -> Self {
        if config.use_free_search {
            BackendKind::DuckDuckGo
        } else if has_value(&config.serpapi_api_key) {
            BackendKind::SerpApi
        } else if has_value(&config.google_api_key) && has_value(&config.google_cse_id) {
            BackendKind::GoogleCse
        } else {
            BackendKind::DuckDuckGo
        }
    }
}

fn has_value(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Build the backend chosen by [`BackendKind::select`]
pub fn select_backend(config: &RetrievalConfig) -> Result<Arc<dyn SearchBackend>, SearchError> {
    let client = http_client(config)?;

    let backend: Arc<dyn SearchBackend> = match BackendKind::select(config) {
        BackendKind::DuckDuckGo => Arc::new(DuckDuckGoBackend::new(client)),
        BackendKind::SerpApi => {
            let key = config.serpapi_api_key.clone().unwrap_or_default();
            Arc::new(SerpApiBackend::new(client, key))
        }
        BackendKind::GoogleCse => {
            let key = config.google_api_key.clone().unwrap_or_default();
            let cx = config.google_cse_id.clone().unwrap_or_default();
            Arc::new(GoogleCseBackend::new(client, key, cx))
        }
    };

    tracing::info!("Using search backend: {}", backend.name());
    Ok(backend)
}

/// Shared HTTP client: per-request timeout, User-Agent, redirects followed
pub(crate) fn http_client(config: &RetrievalConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(config.search_timeout())
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| SearchError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Turn a non-success status into [`SearchError::Http`]
pub(crate) fn check_status(backend: &str, response: &reqwest::Response) -> Result<(), SearchError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(SearchError::Http {
            backend: backend.to_string(),
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(use_free: bool, serp: Option<&str>, google: Option<&str>, cx: Option<&str>) -> RetrievalConfig {
        RetrievalConfig {
            use_free_search: use_free,
            serpapi_api_key: serp.map(String::from),
            google_api_key: google.map(String::from),
            google_cse_id: cx.map(String::from),
            ..RetrievalConfig::default()
        }
    }

    #[test]
    fn test_free_search_wins_when_enabled() {
        let config = keyed(true, Some("serp"), Some("g"), Some("cx"));
        assert_eq!(BackendKind::select(&config), BackendKind::DuckDuckGo);
    }

    #[test]
    fn test_serpapi_before_google() {
        let config = keyed(false, Some("serp"), Some("g"), Some("cx"));
        assert_eq!(BackendKind::select(&config), BackendKind::SerpApi);
    }

    #[test]
    fn test_google_needs_key_and_engine() {
        assert_eq!(
            BackendKind::select(&keyed(false, None, Some("g"), Some("cx"))),
            BackendKind::GoogleCse
        );
        assert_eq!(
            BackendKind::select(&keyed(false, None, Some("g"), None)),
            BackendKind::DuckDuckGo
        );
    }

    #[test]
    fn test_blank_keys_fall_back_to_free() {
        let config = keyed(false, Some("  "), Some(""), Some("cx"));
        assert_eq!(BackendKind::select(&config), BackendKind::DuckDuckGo);
    }

    #[test]
    fn test_select_backend_builds() {
        let backend = select_backend(&keyed(false, Some("serp"), None, None)).unwrap();
        assert_eq!(backend.name(), "serpapi");
    }
}
