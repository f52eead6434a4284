//! Concurrent, bounded evidence retrieval

use crate::backend::{select_backend, SearchBackend, SearchHit, DEFAULT_RELEVANCE};
use crate::config::RetrievalConfig;
use crate::error::SearchError;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;
use veracity_domain::text::preview;
use veracity_domain::{DomainReputationIndex, Evidence, EvidenceMap, UnitScore};

/// Fans search queries out to a backend and collects per-claim evidence
///
/// Every `(claim_id, query)` pair becomes one task. At most
/// `max_concurrent_searches` tasks hold a permit, and therefore have a
/// request in flight, at any moment. A failed or timed-out task yields no
/// hits and never affects its siblings.
pub struct EvidenceRetriever {
    backend: Arc<dyn SearchBackend>,
    reputation: Arc<DomainReputationIndex>,
    config: RetrievalConfig,
}

struct SearchTask {
    claim_id: String,
    query: String,
    handle: JoinHandle<Result<Vec<SearchHit>, SearchError>>,
}

impl EvidenceRetriever {
    /// Create a retriever over `backend` with the built-in reputation registry
    pub fn new(backend: Arc<dyn SearchBackend>, config: RetrievalConfig) -> Self {
        Self {
            backend,
            reputation: Arc::new(DomainReputationIndex::builtin()),
            config,
        }
    }

    /// Create a retriever with the backend selected from `config`
    pub fn from_config(config: RetrievalConfig) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::Config)?;
        let backend = select_backend(&config)?;
        Ok(Self::new(backend, config))
    }

    /// Replace the reputation registry
    pub fn with_reputation(mut self, reputation: Arc<DomainReputationIndex>) -> Self {
        self.reputation = reputation;
        self
    }

    /// Name of the active backend
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Fetch evidence for every claim
    ///
    /// The result has exactly the input's key set. A claim whose queries all
    /// failed maps to an empty list. Within a claim, items are deduplicated
    /// by URL with the first occurrence kept.
    pub async fn fetch(&self, queries: &HashMap<String, Vec<String>>) -> EvidenceMap {
        if queries.is_empty() {
            return EvidenceMap::new();
        }

        let total_queries: usize = queries.values().map(Vec::len).sum();
        info!(
            "Fetching evidence for {} claims ({} queries) via {}",
            queries.len(),
            total_queries,
            self.backend.name()
        );

        let permits = Arc::new(Semaphore::new(self.config.max_concurrent_searches.max(1)));
        let mut tasks = Vec::with_capacity(total_queries);

        for (claim_id, claim_queries) in queries {
            for query in claim_queries {
                tasks.push(SearchTask {
                    claim_id: claim_id.clone(),
                    query: query.clone(),
                    handle: self.spawn_search(Arc::clone(&permits), query.clone()),
                });
            }
        }

        let mut evidence: EvidenceMap = queries
            .keys()
            .map(|claim_id| (claim_id.clone(), Vec::new()))
            .collect();
        let mut seen: HashMap<String, HashSet<String>> = HashMap::new();

        for task in tasks {
            let hits = match task.handle.await {
                Ok(Ok(hits)) => hits,
                Ok(Err(e)) => {
                    warn!(
                        "Search failed for claim {} (query '{}'): {}",
                        task.claim_id,
                        preview(&task.query, 50),
                        e
                    );
                    continue;
                }
                Err(e) => {
                    warn!("Search task for claim {} aborted: {}", task.claim_id, e);
                    continue;
                }
            };

            let items = evidence.entry(task.claim_id.clone()).or_default();
            let urls = seen.entry(task.claim_id).or_default();

            for hit in hits {
                let Some(item) = self.to_evidence(hit) else {
                    continue;
                };
                if urls.insert(item.url.clone()) {
                    items.push(item);
                }
            }
        }

        let total: usize = evidence.values().map(Vec::len).sum();
        info!("Evidence fetched: {} items", total);
        evidence
    }

    fn spawn_search(
        &self,
        permits: Arc<Semaphore>,
        query: String,
    ) -> JoinHandle<Result<Vec<SearchHit>, SearchError>> {
        let backend = Arc::clone(&self.backend);
        let max_results = self.config.max_results_per_query;
        let timeout = self.config.search_timeout();

        tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| SearchError::Request(format!("Semaphore closed: {}", e)))?;

            let mut hits = tokio::time::timeout(timeout, backend.search(&query, max_results))
                .await
                .map_err(|_| SearchError::Timeout)??;
            hits.truncate(max_results);
            Ok(hits)
        })
    }

    /// Annotate a hit with its host and reputation; hits without a
    /// parseable host are dropped
    fn to_evidence(&self, hit: SearchHit) -> Option<Evidence> {
        let domain = match Url::parse(&hit.url) {
            Ok(url) => url.host_str().map(str::to_string),
            Err(e) => {
                debug!("Dropping hit with unparseable URL '{}': {}", hit.url, e);
                None
            }
        }?;

        let domain_reputation = UnitScore::new(self.reputation.get_score(&domain));

        Some(Evidence {
            url: hit.url,
            title: hit.title,
            snippet: hit.snippet,
            domain,
            published_at: hit.published_at,
            relevance_score: UnitScore::new(DEFAULT_RELEVANCE),
            domain_reputation,
        })
    }
}
