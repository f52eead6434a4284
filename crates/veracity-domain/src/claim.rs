//! Claim module - the unit of work flowing through the pipeline

use serde::{Deserialize, Serialize};

/// An atomic factual assertion to be checked
///
/// The id is assigned by the claim-extraction step (conventionally prefixed
/// `clm_`) and must be unique within a pipeline run. `is_verifiable` stays
/// `None` until the classifier resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Caller-assigned identifier
    pub id: String,

    /// The assertion text
    pub text: String,

    /// Whether the claim can be checked against external sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verifiable: Option<bool>,
}

impl Claim {
    /// Create an unclassified claim
    ///
    /// # Examples
    ///
    /// ```
    /// use veracity_domain::Claim;
    ///
    /// let claim = Claim::new("clm_001", "The study was published in Nature in March 2024.");
    /// assert_eq!(claim.id, "clm_001");
    /// assert!(claim.is_verifiable.is_none());
    /// ```
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_verifiable: None,
        }
    }
}

/// Classifier judgement for a single claim
///
/// Produced transiently while filtering the batch; never persisted. All
/// three fields are required when decoding an LLM response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Id of the classified claim
    pub claim_id: String,

    /// Whether the claim is objectively verifiable
    pub is_verifiable: bool,

    /// Short justification
    pub reason: String,
}
