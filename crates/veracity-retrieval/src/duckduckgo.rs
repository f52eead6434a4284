//! DuckDuckGo HTML backend
//!
//! Scrapes the no-JavaScript results page. Result links are usually
//! wrapped in a `//duckduckgo.com/l/?uddg=<encoded>` redirect, which is
//! decoded back to the destination URL.

use crate::backend::{check_status, SearchBackend, SearchHit};
use crate::error::SearchError;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;
use veracity_domain::text::preview;

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

/// Free search via DuckDuckGo's HTML endpoint
pub struct DuckDuckGoBackend {
    client: reqwest::Client,
    search_url: String,
}

impl DuckDuckGoBackend {
    /// Create a backend using `client` for requests
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            search_url: SEARCH_URL.to_string(),
        }
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGoBackend {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&[("q", query)])
            .send()
            .await?;
        check_status(self.name(), &response)?;

        let body = response.text().await?;
        let hits = parse_results(&body, max_results)?;

        if hits.is_empty() {
            warn!("DuckDuckGo returned no results for '{}'", preview(query, 50));
        }
        Ok(hits)
    }
}

/// Extract up to `max_results` hits from a results page
pub(crate) fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
    let result_sel = selector(".result")?;
    let link_sel = selector(".result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let document = Html::parse_document(html);
    let mut hits = Vec::new();

    for block in document.select(&result_sel).take(max_results) {
        let Some(link) = block.select(&link_sel).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href").filter(|h| !h.trim().is_empty()) else {
            continue;
        };

        let snippet = block
            .select(&snippet_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();

        hits.push(SearchHit::new(unwrap_redirect(href), element_text(link), snippet));
    }

    Ok(hits)
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("Bad selector '{}': {}", css, e)))
}

/// Visible text with whitespace runs collapsed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode `//duckduckgo.com/l/?uddg=...` to the destination URL
pub(crate) fn unwrap_redirect(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    if let Ok(parsed) = Url::parse(&absolute) {
        let is_redirect = parsed
            .host_str()
            .is_some_and(|host| host == "duckduckgo.com" || host.ends_with(".duckduckgo.com"))
            && parsed.path().starts_with("/l/");

        if is_redirect {
            if let Some((_, target)) = parsed.query_pairs().find(|(key, _)| key == "uddg") {
                return target.into_owned();
            }
        }
    }

    href.to_string()
}
