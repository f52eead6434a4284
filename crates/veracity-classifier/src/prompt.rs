//! LLM prompt engineering for claim classification

use veracity_domain::Claim;

/// System instruction sent with every classification call
pub const SYSTEM_PROMPT: &str = "You are a claim classifier. Return only valid JSON.";

/// Builds the classification prompt for one claim batch
pub struct PromptBuilder<'a> {
    claims: &'a [Claim],
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder over `claims`
    pub fn new(claims: &'a [Claim]) -> Self {
        Self { claims }
    }

    /// Build the complete classification prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(CRITERIA);
        prompt.push_str("\n\n");
        prompt.push_str(EXAMPLES);
        prompt.push_str("\n\n");

        prompt.push_str("Now analyze these claims:\n");
        for claim in self.claims {
            prompt.push_str(&format!("- ID: {}, Text: {}\n", claim.id, claim.text));
        }
        prompt.push('\n');

        prompt.push_str(OUTPUT_FORMAT);
        prompt
    }
}

const CRITERIA: &str = r#"Analyze these claims and determine if each is objectively verifiable.

A claim is VERIFIABLE if:
- It makes a factual assertion that can be checked against external sources
- It contains specific, measurable details (numbers, names, dates)
- It could in principle be proven true or false

A claim is NOT VERIFIABLE if:
- It is a pure opinion or subjective preference
- It is too vague to check
- It is about personal experience
- It is a prediction about the future
- It is rhetorical or promotional language"#;

const EXAMPLES: &str = r#"EXAMPLES:

Claim: "We have over 10,000 active users worldwide."
Classification: VERIFIABLE
Reason: Contains a specific number that can be checked against records or independent reporting

Claim: "I think this is the best product on the market."
Classification: NOT VERIFIABLE
Reason: Subjective opinion; "best" is not objectively measurable

Claim: "Revenue will increase by 200% next year."
Classification: NOT VERIFIABLE
Reason: Prediction about the future; cannot be checked until it happens

Claim: "The study was published in Nature journal in March 2024."
Classification: VERIFIABLE
Reason: Publication details can be checked against the journal archive

Claim: "Our innovative solution transforms the industry."
Classification: NOT VERIFIABLE
Reason: Vague marketing language with no specific metric to check"#;

const OUTPUT_FORMAT: &str = r#"For each claim, respond with a JSON array:
[
    {"claim_id": "clm_xxx", "is_verifiable": true, "reason": "contains specific numbers"},
    {"claim_id": "clm_yyy", "is_verifiable": false, "reason": "subjective opinion"}
]

Return ONLY the JSON array, no other text."#;
