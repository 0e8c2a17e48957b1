//! Wire-facing data model for evaluation requests and results.
//!
//! These types define the canonical shape the engine accepts and produces.
//! Upstream clients are responsible for reducing heterogeneous chat-log and
//! vector-store exports into [`EvaluationRequest`]; the core never parses
//! those formats.

use serde::{Deserialize, Serialize};

/// A single evaluation request: one query, one model answer, and the
/// retrieved reference passages the answer should be grounded in.
///
/// `context` order is preserved for display, but scoring treats it as a
/// set — concatenation order never affects metric values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The user's question.
    pub query: String,
    /// The LLM-generated answer under evaluation.
    pub response: String,
    /// Retrieved reference passages. May be empty (see hallucination policy).
    #[serde(default)]
    pub context: Vec<String>,
}

impl EvaluationRequest {
    /// Convenience constructor for tests and embedding callers.
    pub fn new(
        query: impl Into<String>,
        response: impl Into<String>,
        context: Vec<String>,
    ) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            context,
        }
    }
}

/// The three quality metrics plus scoring latency.
///
/// All scores are finite and within `[0, 1]`. `hallucination` is inverted:
/// lower is better. `latency_ms` covers the scoring stages only, excluding
/// transport and parsing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// TF-IDF cosine similarity between query and response, 0..1.
    pub relevance: f64,
    /// Fraction of query concepts covered by the response, 0..1.
    pub completeness: f64,
    /// Fraction of response claims unsupported by context, 0..1.
    pub hallucination: f64,
    /// Wall-clock scoring time in milliseconds.
    pub latency_ms: f64,
}

/// Final pass/fail decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerdictStatus {
    Pass,
    Fail,
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Aggregated verdict: status plus one human-readable reason per metric,
/// in fixed order (relevance, completeness, hallucination).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub reasons: Vec<String>,
}

/// The sole output unit of the engine. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub metrics: Metrics,
    pub verdict: Verdict,
}
