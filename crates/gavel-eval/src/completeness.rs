//! Completeness scoring: does the response cover the query's key concepts?
//!
//! The primary signal is query → response concept coverage. Context is
//! consulted only to grant partial credit for concepts the response may
//! have paraphrased but the retrieval clearly contains.

use tracing::debug;

use gavel_core::defaults::CONTEXT_CONCEPT_CREDIT;
use gavel_core::normalize::{normalize, normalize_filtered};

use crate::concepts::{contains_concept, extract_concepts};

/// Score how completely `response` addresses `query`, 0.0 to 1.0.
///
/// Score = covered concepts / total concepts. A concept found only in
/// context (not the response) earns [`CONTEXT_CONCEPT_CREDIT`]. When the
/// query yields no extractable concepts, the score falls back to a
/// token-overlap ratio; a query with no tokens at all scores 0.0 — an
/// undefined query cannot be judged complete.
pub fn score(query: &str, response: &str, context: &[String]) -> f64 {
    let concepts = extract_concepts(query);

    if concepts.is_empty() {
        return token_overlap(query, response);
    }

    let response_tokens = normalize(response);
    let context_tokens: Vec<Vec<String>> = context.iter().map(|p| normalize(p)).collect();

    let mut credit = 0.0;
    for concept in &concepts {
        if contains_concept(&response_tokens, concept) {
            credit += 1.0;
        } else if context_tokens.iter().any(|p| contains_concept(p, concept)) {
            credit += CONTEXT_CONCEPT_CREDIT;
        }
    }

    let score = (credit / concepts.len() as f64).clamp(0.0, 1.0);

    debug!(
        component = "completeness",
        concept_count = concepts.len(),
        score = score,
        "completeness scored"
    );

    score
}

/// Fallback when the query has no extractable concepts:
/// `|tokens(query) ∩ tokens(response)| / |tokens(query)|`.
fn token_overlap(query: &str, response: &str) -> f64 {
    use std::collections::HashSet;

    let q_tokens = {
        let filtered = normalize_filtered(query);
        if filtered.is_empty() {
            normalize(query)
        } else {
            filtered
        }
    };
    if q_tokens.is_empty() {
        return 0.0;
    }

    let q: HashSet<&str> = q_tokens.iter().map(String::as_str).collect();
    let r: HashSet<String> = normalize(response).into_iter().collect();

    let covered = q.iter().filter(|t| r.contains(**t)).count();
    (covered as f64 / q.len() as f64).clamp(0.0, 1.0)
}
