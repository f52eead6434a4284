//! Evidence module - retrieved web results attached to a claim

use crate::UnitScore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Evidence lists keyed by claim id
pub type EvidenceMap = HashMap<String, Vec<Evidence>>;

/// A single search result believed relevant to a claim
///
/// `url` is the dedup key within one claim's evidence list. The JSON shape
/// is wire-stable:
/// `{url, title, snippet, domain, published_at, relevance_score, domain_reputation}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Destination URL
    pub url: String,

    /// Display title
    pub title: String,

    /// Result snippet
    pub snippet: String,

    /// Host component of the URL
    pub domain: String,

    /// Publication date as reported by the backend, if any
    pub published_at: Option<String>,

    /// Backend relevance estimate
    pub relevance_score: UnitScore,

    /// Trust score of `domain`
    pub domain_reputation: UnitScore,
}
