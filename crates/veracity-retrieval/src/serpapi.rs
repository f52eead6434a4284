//! SerpAPI backend (Google engine)

use crate::backend::{check_status, SearchBackend, SearchHit};
use crate::error::SearchError;
use async_trait::async_trait;
use serde::Deserialize;

const SEARCH_URL: &str = "https://serpapi.com/search";

/// Paid search via SerpAPI
pub struct SerpApiBackend {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    #[serde(default)]
    link: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    date: Option<String>,
}

impl SerpApiBackend {
    /// Create a backend authenticated with `api_key`
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SearchBackend for SerpApiBackend {
    fn name(&self) -> &str {
        "serpapi"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let num = max_results.to_string();
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("q", query),
                ("num", num.as_str()),
                ("engine", "google"),
            ])
            .send()
            .await?;
        check_status(self.name(), &response)?;

        let body = response.text().await?;
        parse_response(&body, max_results)
    }
}

pub(crate) fn parse_response(body: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
    let parsed: SerpResponse = serde_json::from_str(body)?;

    Ok(parsed
        .organic_results
        .into_iter()
        .take(max_results)
        .map(|item| SearchHit {
            url: item.link,
            title: item.title,
            snippet: item.snippet,
            published_at: item.date,
        })
        .collect())
}
