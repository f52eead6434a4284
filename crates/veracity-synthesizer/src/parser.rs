//! Parse LLM output into a verdict

use crate::error::SynthesizerError;
use serde::Deserialize;
use veracity_domain::{Verdict, VerdictLabel};

/// Shortest accepted reasoning, in characters
pub const MIN_REASONING_CHARS: usize = 10;

/// Response schema expected from the model
#[derive(Deserialize)]
struct VerdictResponse {
    verdict: VerdictLabel,
    confidence: f64,
    reasoning: String,
    #[serde(default)]
    supporting_sources: Vec<String>,
    #[serde(default)]
    contradicting_sources: Vec<String>,
}

/// Parse the span from the first `{` to the last `}` as a verdict for `claim_id`
///
/// The label must be one of the seven known labels and `confidence` must be
/// present; it is clamped into [0, 1]. Reasoning shorter than
/// [`MIN_REASONING_CHARS`] is rejected.
pub fn parse_verdict(
    response: &str,
    claim_id: &str,
    model_used: &str,
) -> Result<Verdict, SynthesizerError> {
    let json_str = match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if end > start => &response[start..=end],
        _ => return Err(SynthesizerError::NoJsonObject),
    };

    let parsed: VerdictResponse = serde_json::from_str(json_str)?;

    let reasoning = parsed.reasoning.trim();
    if reasoning.chars().count() < MIN_REASONING_CHARS {
        return Err(SynthesizerError::Validation(format!(
            "reasoning must be at least {} characters",
            MIN_REASONING_CHARS
        )));
    }

    Ok(Verdict::new(
        claim_id,
        parsed.verdict,
        parsed.confidence,
        reasoning,
        model_used,
    )
    .with_sources(parsed.supporting_sources, parsed.contradicting_sources))
}
