//! Veracity Claim Classifier
//!
//! Filters a batch of claims down to the ones that can be checked against
//! external sources, using a single LLM call per batch.
//!
//! # Failure policy
//!
//! The classifier fails open. If the model is unreachable, times out, or
//! answers with anything other than a valid JSON array of classifications,
//! every input claim is kept. A claim the model simply forgot to mention
//! is kept as well; only an explicit `is_verifiable: false` drops one.
//!
//! # Example Usage
//!
//! ```
//! use veracity_classifier::{ClaimClassifier, ClassifierConfig};
//! use veracity_domain::Claim;
//! use veracity_llm::MockProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let llm = MockProvider::new(r#"[
//!     {"claim_id": "c1", "is_verifiable": true, "reason": "specific number"},
//!     {"claim_id": "c2", "is_verifiable": false, "reason": "opinion"}
//! ]"#);
//! let classifier = ClaimClassifier::new(llm, ClassifierConfig::default());
//!
//! let mut claims = vec![
//!     Claim::new("c1", "Over 10,000 users use this product."),
//!     Claim::new("c2", "This is the best tool."),
//! ];
//! let kept = classifier.filter(&mut claims).await;
//!
//! assert_eq!(kept.len(), 1);
//! assert_eq!(claims[1].is_verifiable, Some(false));
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod parser;
mod prompt;

pub use classifier::ClaimClassifier;
pub use config::ClassifierConfig;
pub use error::ClassifierError;
pub use parser::parse_classifications;
pub use prompt::{PromptBuilder, SYSTEM_PROMPT};
