//! Veracity Evidence Retrieval
//!
//! Turns per-claim search queries into per-claim evidence lists.
//!
//! # Architecture
//!
//! ```text
//! {claim_id: [query]} → EvidenceRetriever → SearchBackend (≤ N in flight)
//!                                         → dedup by URL, reputation lookup
//!                                         → {claim_id: [Evidence]}
//! ```
//!
//! # Backends
//!
//! - `DuckDuckGoBackend`: free HTML results page, scraped
//! - `SerpApiBackend`: SerpAPI Google engine (API key)
//! - `GoogleCseBackend`: Google Custom Search JSON API (key + engine id)
//!
//! The active backend is chosen once from `RetrievalConfig` by
//! [`select_backend`].
//!
//! # Example Usage
//!
//! ```no_run
//! use std::collections::HashMap;
//! use veracity_retrieval::{EvidenceRetriever, RetrievalConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let retriever = EvidenceRetriever::from_config(RetrievalConfig::default())?;
//!
//! let mut queries = HashMap::new();
//! queries.insert("clm_001".to_string(), vec!["Nature journal March 2024 study".to_string()]);
//!
//! let evidence = retriever.fetch(&queries).await;
//! println!("{} items", evidence["clm_001"].len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod backend;
mod config;
mod duckduckgo;
mod error;
mod google;
mod retriever;
mod serpapi;

pub use backend::{select_backend, BackendKind, SearchBackend, SearchHit, DEFAULT_RELEVANCE};
pub use config::RetrievalConfig;
pub use duckduckgo::DuckDuckGoBackend;
pub use error::SearchError;
pub use google::GoogleCseBackend;
pub use retriever::EvidenceRetriever;
pub use serpapi::SerpApiBackend;
