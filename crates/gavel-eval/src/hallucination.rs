//! Hallucination detection: n-gram claim extraction + context entailment.
//!
//! Candidate claims are overlapping token n-grams of the response (n in
//! 2..=4) plus every numeric token as a standalone claim — unsupported
//! numbers are the strongest hallucination signal. Each claim is checked
//! against the context: a contiguous match inside any single passage
//! supports it outright; otherwise a claim counts as supported when at
//! least [`CLAIM_SUPPORT_FRACTION`] of its tokens appear in the combined
//! context vocabulary (stopwords always count as present).
//!
//! Score = unsupported claims / total claims, so 0.0 is fully grounded and
//! 1.0 is fully fabricated.
//!
//! ## Empty-context policy
//!
//! With no context (or context that normalizes to nothing) the detector
//! cannot verify anything; the score is **1.0** — unverifiable output is
//! treated as maximally risky. This is an explicit contract: context-less
//! evaluations breach the default hallucination threshold.

use std::collections::HashSet;

use tracing::debug;

use gavel_core::defaults::{CLAIM_NGRAM_MAX, CLAIM_NGRAM_MIN, CLAIM_SUPPORT_FRACTION};
use gavel_core::normalize::{is_stopword, normalize};

/// Score how much of `response` is unsupported by `context`, 0.0 (fully
/// grounded) to 1.0 (fully hallucinated).
///
/// A response with no extractable claims scores 0.0 — nothing to refute.
pub fn score(response: &str, context: &[String]) -> f64 {
    let response_tokens = normalize(response);
    if response_tokens.is_empty() {
        return 0.0;
    }

    let passages: Vec<Vec<String>> = context
        .iter()
        .map(|p| normalize(p))
        .filter(|t| !t.is_empty())
        .collect();
    if passages.is_empty() {
        return 1.0;
    }

    let claims = extract_claims(&response_tokens);
    if claims.is_empty() {
        return 0.0;
    }

    let vocabulary: HashSet<&str> = passages
        .iter()
        .flat_map(|p| p.iter().map(String::as_str))
        .collect();

    let unsupported = claims
        .iter()
        .filter(|claim| !is_supported(claim, &passages, &vocabulary))
        .count();

    let score = (unsupported as f64 / claims.len() as f64).clamp(0.0, 1.0);

    debug!(
        component = "hallucination",
        claim_count = claims.len(),
        unsupported = unsupported,
        score = score,
        "hallucination scored"
    );

    score
}

/// Unique claims: overlapping n-grams for n in 2..=4 plus numeric
/// singletons, in first-occurrence order.
fn extract_claims(tokens: &[String]) -> Vec<Vec<String>> {
    let mut claims: Vec<Vec<String>> = Vec::new();
    let mut seen: HashSet<Vec<String>> = HashSet::new();

    for n in CLAIM_NGRAM_MIN..=CLAIM_NGRAM_MAX {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            let claim = window.to_vec();
            if seen.insert(claim.clone()) {
                claims.push(claim);
            }
        }
    }

    for token in tokens {
        if token.chars().any(|c| c.is_ascii_digit()) {
            let claim = vec![token.clone()];
            if seen.insert(claim.clone()) {
                claims.push(claim);
            }
        }
    }

    claims
}

/// A claim is supported by a contiguous match in any single passage
/// (never across passage boundaries, so context order cannot matter), or
/// by sufficient token coverage in the combined vocabulary.
fn is_supported(claim: &[String], passages: &[Vec<String>], vocabulary: &HashSet<&str>) -> bool {
    if passages
        .iter()
        .any(|p| p.len() >= claim.len() && p.windows(claim.len()).any(|w| w == claim))
    {
        return true;
    }

    let present = claim
        .iter()
        .filter(|t| is_stopword(t) || vocabulary.contains(t.as_str()))
        .count();
    present as f64 / claim.len() as f64 >= CLAIM_SUPPORT_FRACTION
}
