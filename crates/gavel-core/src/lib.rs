//! # gavel-core
//!
//! Core types, traits, and abstractions for the gavel evaluation engine.
//!
//! This crate provides the foundational data structures, error taxonomy,
//! configuration, and the shared text normalizer that every scorer in
//! `gavel-eval` depends on.

pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;

// Re-export commonly used types at crate root
pub use config::{EvalConfig, Thresholds};
pub use error::{Error, Result};
pub use models::{EvaluationRequest, EvaluationResult, Metrics, Verdict, VerdictStatus};
pub use normalize::{is_stopword, normalize, normalize_filtered};
