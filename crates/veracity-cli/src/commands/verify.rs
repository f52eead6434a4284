//! Verify command implementation.

use crate::cli::VerifyArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use tracing::{info, warn};
use veracity_cache::ResultCache;
use veracity_domain::Claim;
use veracity_pipeline::{VerificationPipeline, VerificationReport};

/// One entry of the input file.
#[derive(Debug, Deserialize)]
pub struct ClaimInput {
    /// Claim id, unique within the file
    pub id: String,

    /// Claim text
    pub text: String,

    /// Search queries; the claim text is searched when absent
    #[serde(default)]
    pub queries: Vec<String>,
}

/// Parse the input file into claims and their queries.
pub fn parse_input(json: &str) -> Result<(Vec<Claim>, HashMap<String, Vec<String>>)> {
    let inputs: Vec<ClaimInput> = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    let mut claims = Vec::with_capacity(inputs.len());
    let mut queries = HashMap::new();

    for input in inputs {
        if input.id.trim().is_empty() {
            return Err(CliError::InvalidInput("claim id must not be empty".to_string()));
        }
        if input.text.trim().is_empty() {
            return Err(CliError::InvalidInput(format!("claim '{}' has no text", input.id)));
        }
        if !seen.insert(input.id.clone()) {
            return Err(CliError::InvalidInput(format!("duplicate claim id '{}'", input.id)));
        }

        let claim_queries: Vec<String> = input
            .queries
            .into_iter()
            .filter(|q| !q.trim().is_empty())
            .collect();
        if !claim_queries.is_empty() {
            queries.insert(input.id.clone(), claim_queries);
        }
        claims.push(Claim::new(input.id, input.text));
    }

    Ok((claims, queries))
}

/// Execute the verify command.
pub async fn execute_verify(args: VerifyArgs, config: &AppConfig, formatter: &Formatter) -> Result<()> {
    let input = fs::read_to_string(&args.input)?;
    let (claims, queries) = parse_input(&input)?;

    let content = match &args.text_file {
        Some(path) => fs::read_to_string(path)?,
        None => input,
    };
    let hash = ResultCache::content_hash(&content);

    let cache = if args.no_cache { None } else { open_cache(config) };

    if let Some(report) = cached_report(cache.as_ref(), &hash) {
        eprintln!("{}", formatter.info(&format!("Cached result {}", hash)));
        println!("{}", formatter.format_report(&report)?);
        return Ok(());
    }

    let pipeline = VerificationPipeline::from_config(&config.pipeline())?;
    let report = pipeline.verify_claims(claims, &queries).await;

    if let Some(cache) = &cache {
        if cache.cache_verification(&hash, &report, None) {
            info!("Cached result under {}", hash);
        }
        cache.close();
    }

    println!("{}", formatter.format_report(&report)?);
    Ok(())
}

/// Look up a cached report; the cache is closed on a hit.
fn cached_report(cache: Option<&ResultCache>, hash: &str) -> Option<VerificationReport> {
    let cache = cache?;
    let report = cache.get_cached_verification::<VerificationReport>(hash)?;
    info!("Serving cached result for {}", hash);
    cache.close();
    Some(report)
}

/// Connect the cache, or run uncached if it cannot be opened.
fn open_cache(config: &AppConfig) -> Option<ResultCache> {
    let cache = ResultCache::open(config.cache.clone());
    match cache.connect() {
        Ok(()) => Some(cache),
        Err(e) => {
            warn!("Result cache unavailable, continuing without it: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_cache::CacheConfig;
    use veracity_domain::{PageScore, VerificationSummary};
    use veracity_pipeline::ModelsUsed;

    fn empty_report() -> VerificationReport {
        VerificationReport {
            claims: vec![],
            unverifiable: vec![],
            page_score: PageScore::new(50),
            summary: VerificationSummary::default(),
            models_used: ModelsUsed {
                classifier: "fast".to_string(),
                synthesizer: "main".to_string(),
            },
            sources_checked: 0,
        }
    }

    #[test]
    fn test_cache_hit_closes_cache() {
        let cache = ResultCache::open(CacheConfig::in_memory());
        cache.connect().unwrap();
        let hash = ResultCache::content_hash("[]");
        assert!(cache.cache_verification(&hash, &empty_report(), None));

        let report = cached_report(Some(&cache), &hash).unwrap();
        assert_eq!(report.page_score.value(), 50);
        assert!(!cache.is_connected());
    }

    #[test]
    fn test_cache_miss_keeps_cache_open() {
        let cache = ResultCache::open(CacheConfig::in_memory());
        cache.connect().unwrap();

        assert!(cached_report(Some(&cache), "absent").is_none());
        assert!(cache.is_connected());
        assert!(cached_report(None, "absent").is_none());
    }

    #[test]
    fn test_parse_input() {
        let (claims, queries) = parse_input(
            r#"[
                {"id": "c1", "text": "Over 10,000 users use this product.", "queries": ["product users", " "]},
                {"id": "c2", "text": "Founded in 2012."}
            ]"#,
        )
        .unwrap();

        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].id, "c1");
        assert!(claims[1].is_verifiable.is_none());
        assert_eq!(queries["c1"], vec!["product users"]);
        assert!(!queries.contains_key("c2"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = parse_input(r#"[{"id": "c1", "text": "a"}, {"id": "c1", "text": "b"}]"#).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(parse_input(r#"[{"id": "c1", "text": "  "}]"#).is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            parse_input(r#"{"id": "c1"}"#),
            Err(CliError::Serialization(_))
        ));
    }

    #[test]
    fn test_empty_list_is_fine() {
        let (claims, queries) = parse_input("[]").unwrap();
        assert!(claims.is_empty());
        assert!(queries.is_empty());
    }
}
