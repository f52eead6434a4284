//! Veracity Verdict Synthesizer
//!
//! Converts each claim and its evidence into a structured [`Verdict`] with
//! one LLM call per claim.
//!
//! # Failure policy
//!
//! The synthesizer fails closed, one claim at a time. A call that errors,
//! times out, or returns JSON that does not validate yields a
//! `not_verifiable` verdict with confidence 0 for that claim only; the
//! remaining claims are still verified. The output always has the input's
//! length and order.
//!
//! # Example Usage
//!
//! ```
//! use veracity_domain::{Claim, EvidenceMap, VerdictLabel};
//! use veracity_llm::MockProvider;
//! use veracity_synthesizer::{SynthesizerConfig, VerdictSynthesizer};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let llm = MockProvider::new("not json");
//! let synthesizer = VerdictSynthesizer::new(llm, SynthesizerConfig::default());
//!
//! let claims = vec![Claim::new("c1", "The study was published in Nature in March 2024.")];
//! let verdicts = synthesizer.verify(&claims, &EvidenceMap::new()).await;
//!
//! assert_eq!(verdicts.len(), 1);
//! assert_eq!(verdicts[0].verdict, VerdictLabel::NotVerifiable);
//! # }
//! ```
//!
//! [`Verdict`]: veracity_domain::Verdict

#![warn(missing_docs)]

mod config;
mod error;
mod parser;
mod prompt;
mod synthesizer;

pub use config::SynthesizerConfig;
pub use error::SynthesizerError;
pub use parser::{parse_verdict, MIN_REASONING_CHARS};
pub use prompt::{PromptBuilder, NO_EVIDENCE_MARKER, SYSTEM_PROMPT};
pub use synthesizer::{VerdictSynthesizer, NO_EVIDENCE_CONFIDENCE_CAP, NO_EVIDENCE_REASONING};
