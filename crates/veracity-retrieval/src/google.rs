//! Google Custom Search JSON API backend

use crate::backend::{check_status, SearchBackend, SearchHit};
use crate::error::SearchError;
use async_trait::async_trait;
use serde::Deserialize;

const SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// The API rejects `num` above 10
const MAX_NUM: usize = 10;

/// Paid search via Google Custom Search
pub struct GoogleCseBackend {
    client: reqwest::Client,
    api_key: String,
    engine_id: String,
}

#[derive(Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<CseItem>,
}

#[derive(Deserialize)]
struct CseItem {
    #[serde(default)]
    link: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

impl GoogleCseBackend {
    /// Create a backend for search engine `engine_id`
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        }
    }
}

#[async_trait]
impl SearchBackend for GoogleCseBackend {
    fn name(&self) -> &str {
        "google_cse"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let num = max_results.min(MAX_NUM).to_string();
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?;
        check_status(self.name(), &response)?;

        let body = response.text().await?;
        parse_response(&body, max_results)
    }
}

pub(crate) fn parse_response(body: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
    let parsed: CseResponse = serde_json::from_str(body)?;

    Ok(parsed
        .items
        .into_iter()
        .take(max_results)
        .map(|item| SearchHit::new(item.link, item.title, item.snippet))
        .collect())
}
