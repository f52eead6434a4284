//! Domain reputation registry
//!
//! Static trust scores for web domains, used to weight evidence sources.
//!
//! Score tiers:
//! - 0.95: authoritative, highly trusted
//! - 0.90: trusted, professional
//! - 0.85: generally reliable
//! - 0.70: acceptable, community-driven
//! - 0.50: unknown (default)
//! - 0.20: placeholder / known low quality

use crate::UnitScore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category returned for domains the registry does not know
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Built-in registered domains, in lookup order
const BUILTIN_DOMAINS: &[(&str, f64, &str)] = &[
    // News organizations, tier 1
    ("reuters.com", 0.95, "news"),
    ("apnews.com", 0.95, "news"),
    ("bbc.com", 0.95, "news"),
    ("bbc.co.uk", 0.95, "news"),
    ("npr.org", 0.95, "news"),
    // News organizations, tier 2
    ("nytimes.com", 0.90, "news"),
    ("washingtonpost.com", 0.90, "news"),
    ("wsj.com", 0.90, "news"),
    ("theguardian.com", 0.90, "news"),
    ("economist.com", 0.90, "news"),
    ("ft.com", 0.90, "news"),
    ("bloomberg.com", 0.90, "news"),
    ("cnbc.com", 0.85, "news"),
    ("cnn.com", 0.85, "news"),
    ("time.com", 0.85, "news"),
    // Scientific journals
    ("nature.com", 0.95, "science"),
    ("science.org", 0.95, "science"),
    ("cell.com", 0.95, "science"),
    ("nejm.org", 0.95, "medical"),
    ("thelancet.com", 0.95, "medical"),
    ("bmj.com", 0.95, "medical"),
    ("pnas.org", 0.95, "science"),
    // Government and health authorities
    ("who.int", 0.95, "health"),
    ("cdc.gov", 0.95, "health"),
    ("nih.gov", 0.95, "health"),
    ("fda.gov", 0.95, "health"),
    ("un.org", 0.95, "government"),
    ("europa.eu", 0.95, "government"),
    ("gov.uk", 0.95, "government"),
    // Reference
    ("wikipedia.org", 0.90, "reference"),
    ("britannica.com", 0.95, "reference"),
    ("oxforddictionaries.com", 0.95, "reference"),
    ("merriam-webster.com", 0.90, "reference"),
    // Technology and standards
    ("github.com", 0.90, "tech"),
    ("stackoverflow.com", 0.85, "tech"),
    ("arxiv.org", 0.90, "research"),
    ("ieee.org", 0.90, "research"),
    ("acm.org", 0.90, "research"),
    ("w3.org", 0.95, "standards"),
    ("ietf.org", 0.95, "standards"),
    // Financial and business
    ("sec.gov", 0.95, "finance"),
    ("forbes.com", 0.80, "business"),
    ("fortune.com", 0.80, "business"),
    ("marketwatch.com", 0.80, "finance"),
    // Tech news
    ("techcrunch.com", 0.75, "tech"),
    ("wired.com", 0.80, "tech"),
    ("arstechnica.com", 0.85, "tech"),
    ("theverge.com", 0.75, "tech"),
    ("engadget.com", 0.70, "tech"),
    // Professional and community platforms
    ("linkedin.com", 0.70, "professional"),
    ("medium.com", 0.65, "community"),
    ("substack.com", 0.65, "community"),
    // Academic databases
    ("pubmed.ncbi.nlm.nih.gov", 0.95, "medical"),
    ("sciencedirect.com", 0.90, "research"),
    ("springer.com", 0.90, "research"),
    ("wiley.com", 0.90, "research"),
    ("jstor.org", 0.90, "research"),
    // Fact-checking organizations
    ("factcheck.org", 0.95, "fact-checking"),
    ("snopes.com", 0.90, "fact-checking"),
    ("politifact.com", 0.90, "fact-checking"),
    ("fullfact.org", 0.90, "fact-checking"),
    // International news
    ("aljazeera.com", 0.85, "news"),
    ("dw.com", 0.85, "news"),
    ("france24.com", 0.85, "news"),
    ("rfi.fr", 0.85, "news"),
    // Statistics and data
    ("worldbank.org", 0.95, "data"),
    ("imf.org", 0.95, "data"),
    ("oecd.org", 0.95, "data"),
    ("census.gov", 0.95, "data"),
    ("data.gov", 0.90, "data"),
    ("statista.com", 0.80, "data"),
    // Environment and climate
    ("ipcc.ch", 0.95, "climate"),
    ("noaa.gov", 0.95, "climate"),
    ("nasa.gov", 0.95, "science"),
    // Placeholders
    ("example.com", 0.20, "placeholder"),
    ("example.org", 0.20, "placeholder"),
    ("test.com", 0.20, "placeholder"),
];

/// Suffix patterns granting a default score to whole TLDs
const BUILTIN_SUFFIXES: &[(&str, f64, &str)] = &[
    (".gov", 0.90, "government"),
    (".edu", 0.85, "academic"),
    (".ac.uk", 0.85, "academic"),
    (".mil", 0.90, "government"),
];

/// Reputation score and category for a domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationEntry {
    /// Trust score
    pub score: UnitScore,

    /// Source category (news, science, government, ...)
    pub category: String,
}

impl ReputationEntry {
    /// Create an entry, clamping the score into [0, 1]
    pub fn new(score: f64, category: impl Into<String>) -> Self {
        Self {
            score: UnitScore::new(score),
            category: category.into(),
        }
    }

    /// The entry returned for unknown domains: `{0.5, "unknown"}`
    pub fn unknown() -> Self {
        Self {
            score: UnitScore::NEUTRAL,
            category: UNKNOWN_CATEGORY.to_string(),
        }
    }
}

/// Static lookup from hostname to reputation
///
/// Lookup is pure and total:
/// 1. exact match against a registered domain
/// 2. dot-anchored subdomain match (`x.wikipedia.org`, never
///    `evilwikipedia.org` or `wikipedia.org.evil.com`), first registered
///    domain in order wins
/// 3. suffix patterns (`.gov`, `.edu`, `.ac.uk`, `.mil`)
/// 4. `{0.5, "unknown"}`
///
/// # Examples
///
/// ```
/// use veracity_domain::DomainReputationIndex;
///
/// let index = DomainReputationIndex::builtin();
/// assert_eq!(index.get_score("en.wikipedia.org"), 0.90);
/// assert_eq!(index.lookup("wikipedia.org.evil.com").category, "unknown");
/// ```
#[derive(Debug, Clone)]
pub struct DomainReputationIndex {
    domains: Vec<(String, ReputationEntry)>,
    exact: HashMap<String, usize>,
    suffixes: Vec<(String, ReputationEntry)>,
}

impl DomainReputationIndex {
    /// Create an empty index (every lookup resolves to unknown)
    pub fn empty() -> Self {
        Self {
            domains: Vec::new(),
            exact: HashMap::new(),
            suffixes: Vec::new(),
        }
    }

    /// Create the index from the built-in registry
    pub fn builtin() -> Self {
        let mut index = Self::empty();
        for (domain, score, category) in BUILTIN_DOMAINS {
            index.register_domain(domain, *score, *category);
        }
        for (suffix, score, category) in BUILTIN_SUFFIXES {
            index.register_suffix(suffix, *score, *category);
        }
        index
    }

    /// Register a domain (later lookups see it after existing entries)
    ///
    /// Re-registering an existing domain replaces its entry in place.
    pub fn register_domain(&mut self, domain: &str, score: f64, category: impl Into<String>) {
        let domain = normalize(domain);
        let entry = ReputationEntry::new(score, category);

        if let Some(&idx) = self.exact.get(&domain) {
            self.domains[idx].1 = entry;
            return;
        }

        self.exact.insert(domain.clone(), self.domains.len());
        self.domains.push((domain, entry));
    }

    /// Register a suffix pattern such as `.gov`
    pub fn register_suffix(&mut self, suffix: &str, score: f64, category: impl Into<String>) {
        let suffix = normalize(suffix);
        let suffix = if suffix.starts_with('.') {
            suffix
        } else {
            format!(".{}", suffix)
        };
        self.suffixes.push((suffix, ReputationEntry::new(score, category)));
    }

    /// Look up the reputation of a domain
    pub fn lookup(&self, domain: &str) -> ReputationEntry {
        let domain = normalize(domain);

        if let Some(&idx) = self.exact.get(&domain) {
            return self.domains[idx].1.clone();
        }

        if let Some((_, entry)) = self
            .domains
            .iter()
            .find(|(registered, _)| is_subdomain_of(&domain, registered))
        {
            return entry.clone();
        }

        if let Some((_, entry)) = self
            .suffixes
            .iter()
            .find(|(suffix, _)| domain.ends_with(suffix.as_str()))
        {
            return entry.clone();
        }

        ReputationEntry::unknown()
    }

    /// Look up only the numeric score
    pub fn get_score(&self, domain: &str) -> f64 {
        self.lookup(domain).score.value()
    }

    /// Registered domains in lookup order
    pub fn registered_domains(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(|(domain, _)| domain.as_str())
    }

    /// Number of registered domains
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Whether no domains are registered
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for DomainReputationIndex {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize(domain: &str) -> String {
    domain.trim().to_lowercase()
}

/// `domain` is a strict subdomain of `registered`, anchored on a dot
fn is_subdomain_of(domain: &str, registered: &str) -> bool {
    domain.len() > registered.len() + 1
        && domain.ends_with(registered)
        && domain.as_bytes()[domain.len() - registered.len() - 1] == b'.'
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_match() {
        let index = DomainReputationIndex::builtin();
        let entry = index.lookup("reuters.com");
        assert_eq!(entry.score.value(), 0.95);
        assert_eq!(entry.category, "news");
    }

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let index = DomainReputationIndex::builtin();
        assert_eq!(index.lookup("  Nature.COM "), index.lookup("nature.com"));
    }

    #[test]
    fn test_subdomain_match() {
        let index = DomainReputationIndex::builtin();
        assert_eq!(index.lookup("gist.github.com"), ReputationEntry::new(0.90, "tech"));
        assert_eq!(index.lookup("en.wikipedia.org"), index.lookup("wikipedia.org"));
    }

    #[test]
    fn test_spoofed_domains_are_unknown() {
        let index = DomainReputationIndex::builtin();
        let genuine = index.lookup("wikipedia.org");

        for spoof in ["evilwikipedia.org", "wikipedia.org.evil.com", "notreuters.com"] {
            let entry = index.lookup(spoof);
            assert_ne!(entry, genuine, "{} must not match", spoof);
            assert_eq!(entry, ReputationEntry::unknown(), "{} should be unknown", spoof);
        }
    }

    #[test]
    fn test_suffix_fallback() {
        let index = DomainReputationIndex::builtin();
        assert_eq!(index.lookup("some.agency.gov"), ReputationEntry::new(0.90, "government"));
        assert_eq!(index.lookup("cs.stanford.edu"), ReputationEntry::new(0.85, "academic"));
        assert_eq!(index.lookup("www.ox.ac.uk"), ReputationEntry::new(0.85, "academic"));
        assert_eq!(index.lookup("army.mil"), ReputationEntry::new(0.90, "government"));
    }

    #[test]
    fn test_registered_subdomain_beats_suffix() {
        let index = DomainReputationIndex::builtin();
        assert_eq!(index.lookup("www.cdc.gov"), ReputationEntry::new(0.95, "health"));
    }

    #[test]
    fn test_unknown_default() {
        let index = DomainReputationIndex::builtin();
        assert_eq!(index.lookup("randomblog.net"), ReputationEntry::unknown());
        assert_eq!(index.get_score(""), 0.5);
    }

    #[test]
    fn test_first_registered_subdomain_wins() {
        let mut index = DomainReputationIndex::empty();
        index.register_domain("example.net", 0.3, "first");
        index.register_domain("sub.example.net", 0.9, "second");

        assert_eq!(index.lookup("a.sub.example.net").category, "first");
        assert_eq!(index.lookup("sub.example.net").category, "second");
    }

    #[test]
    fn test_reregister_replaces_entry() {
        let mut index = DomainReputationIndex::empty();
        index.register_domain("example.net", 0.3, "old");
        index.register_domain("Example.net", 0.7, "new");

        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("example.net"), ReputationEntry::new(0.7, "new"));
    }

    #[test]
    fn test_registered_scores_in_unit_interval() {
        let index = DomainReputationIndex::builtin();
        for domain in index.registered_domains() {
            let score = index.get_score(domain);
            assert!((0.0..=1.0).contains(&score), "{} has score {}", domain, score);
        }
    }

    #[test]
    fn test_subdomain_score_matches_registered_score() {
        let index = DomainReputationIndex::builtin();
        for domain in index.registered_domains() {
            let sub = format!("x.{}", domain);
            assert_eq!(index.get_score(&sub), index.get_score(domain), "{}", sub);
        }
    }

    proptest! {
        #[test]
        fn prop_lookup_is_total_and_bounded(domain in "[a-z0-9.-]{0,40}") {
            let index = DomainReputationIndex::builtin();
            let score = index.get_score(&domain);
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn prop_prefix_without_dot_never_matches(prefix in "[a-z]{1,10}") {
            let index = DomainReputationIndex::builtin();
            let spoof = format!("{}wikipedia.org", prefix);
            prop_assert_ne!(index.lookup(&spoof).category, "reference");
        }
    }
}
