//! # gavel-eval
//!
//! Scoring engine for gavel: turns a `(query, response, context)` triple
//! into three quality metrics and an aggregated PASS/FAIL verdict.
//!
//! This crate provides:
//! - TF-IDF + cosine relevance scoring
//! - Concept-coverage completeness scoring
//! - N-gram claim entailment hallucination detection
//! - Threshold-based verdict aggregation
//! - The evaluation orchestrator ([`Evaluator`]), the sole public entrypoint
//!
//! ## Example
//!
//! ```ignore
//! use gavel_eval::{Evaluator, EvalConfig, EvaluationRequest};
//!
//! let evaluator = Evaluator::new(EvalConfig::from_env());
//! let request = EvaluationRequest::new(
//!     "What is the capital of France?",
//!     "The capital of France is Paris.",
//!     vec!["Its capital is Paris.".to_string()],
//! );
//! let result = evaluator.evaluate(&request).await?;
//! assert_eq!(result.verdict.status.to_string(), "PASS");
//! ```

pub mod aggregate;
pub mod completeness;
pub mod concepts;
pub mod hallucination;
pub mod pipeline;
pub mod relevance;

// Re-export core types
pub use gavel_core::*;

// Re-export engine types
pub use aggregate::aggregate;
pub use concepts::extract_concepts;
pub use pipeline::Evaluator;
