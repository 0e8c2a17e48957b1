//! Relevance scoring: TF-IDF + cosine similarity between query and response.
//!
//! The vector space is built over the two-document corpus `{query, response}`
//! as the guaranteed minimum; when context passages are available they join
//! the corpus for richer idf without contributing vectors of their own.
//! The cosine is averaged with a raw-token Jaccard overlap so that exact
//! keyword matches keep weight even when idf flattens over a tiny corpus.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use gavel_core::normalize::{normalize, normalize_filtered};

/// Score how relevant `response` is to `query`, 0.0 (irrelevant) to 1.0
/// (highly relevant).
///
/// Edge cases: either side normalizing to an empty token sequence scores
/// 0.0; a token-identical query/response pair scores exactly 1.0.
pub fn score(query: &str, response: &str, context: &[String]) -> f64 {
    let q_raw = normalize(query);
    let r_raw = normalize(response);

    if q_raw.is_empty() || r_raw.is_empty() {
        return 0.0;
    }
    if q_raw == r_raw {
        return 1.0;
    }

    // Stopword-filtered tokens feed the TF-IDF vectors; queries made purely
    // of stopwords fall back to the raw sequence so the metric stays defined.
    let q_tokens = non_empty(normalize_filtered(query), &q_raw);
    let r_tokens = non_empty(normalize_filtered(response), &r_raw);

    let cosine = tfidf_cosine(&q_tokens, &r_tokens, context);
    let jaccard = jaccard_overlap(&q_raw, &r_raw);

    let score = ((cosine + jaccard) / 2.0).clamp(0.0, 1.0);

    debug!(
        component = "relevance",
        cosine = cosine,
        jaccard = jaccard,
        score = score,
        "relevance scored"
    );

    score
}

fn non_empty(filtered: Vec<String>, raw: &[String]) -> Vec<String> {
    if filtered.is_empty() {
        raw.to_vec()
    } else {
        filtered
    }
}

/// Cosine similarity between the TF-IDF vectors of the query and response.
///
/// `tf(t, d) = count(t, d) / |d|`, `idf(t) = ln(N / (1 + df(t))) + 1`.
/// Context passages enter the corpus for document-frequency counting only.
fn tfidf_cosine(q_tokens: &[String], r_tokens: &[String], context: &[String]) -> f64 {
    let mut corpus: Vec<Vec<String>> = vec![q_tokens.to_vec(), r_tokens.to_vec()];
    for passage in context {
        let tokens = normalize_filtered(passage);
        if !tokens.is_empty() {
            corpus.push(tokens);
        }
    }

    let n = corpus.len() as f64;
    let mut df: HashMap<&str, usize> = HashMap::new();
    for doc in &corpus {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for term in unique {
            *df.entry(term).or_insert(0) += 1;
        }
    }

    let idf = |term: &str| -> f64 {
        let df_t = df.get(term).copied().unwrap_or(0) as f64;
        (n / (1.0 + df_t)).ln() + 1.0
    };

    let q_vec = tfidf_vector(q_tokens, &idf);
    let r_vec = tfidf_vector(r_tokens, &idf);

    let dot: f64 = q_vec
        .iter()
        .filter_map(|(term, w)| r_vec.get(term).map(|rw| w * rw))
        .sum();
    let q_norm: f64 = q_vec.values().map(|w| w * w).sum::<f64>().sqrt();
    let r_norm: f64 = r_vec.values().map(|w| w * w).sum::<f64>().sqrt();

    if q_norm == 0.0 || r_norm == 0.0 {
        return 0.0;
    }

    // Non-negative weights cannot produce a negative cosine, but the
    // invariant is clamped regardless.
    (dot / (q_norm * r_norm)).clamp(0.0, 1.0)
}

fn tfidf_vector(tokens: &[String], idf: impl Fn(&str) -> f64) -> HashMap<String, f64> {
    let len = tokens.len() as f64;
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(term, count)| {
            let tf = count as f64 / len;
            (term.to_string(), tf * idf(term))
        })
        .collect()
}

/// Set overlap of raw normalized tokens, `|q ∩ r| / |q ∪ r|`.
fn jaccard_overlap(q_tokens: &[String], r_tokens: &[String]) -> f64 {
    let q: HashSet<&str> = q_tokens.iter().map(String::as_str).collect();
    let r: HashSet<&str> = r_tokens.iter().map(String::as_str).collect();

    let union = q.union(&r).count();
    if union == 0 {
        return 0.0;
    }
    q.intersection(&r).count() as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_scores_one() {
        let s = score("The capital of France is Paris.", "The capital of France is Paris.", &[]);
        assert!((s - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_token_identical_despite_punctuation() {
        // Same tokens, different punctuation and case
        let s = score("what is rust", "What is Rust?", &[]);
        assert!((s - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_query_scores_zero() {
        assert_eq!(score("", "Some response", &[]), 0.0);
        assert_eq!(score("?!", "Some response", &[]), 0.0);
    }

    #[test]
    fn test_empty_response_scores_zero() {
        assert_eq!(score("Some query", "", &[]), 0.0);
    }

    #[test]
    fn test_unrelated_text_scores_low() {
        let s = score(
            "What is the capital of France?",
            "Bananas are rich in potassium.",
            &[],
        );
        assert!(s < 0.2, "Unrelated response should score < 0.2, got {}", s);
    }

    #[test]
    fn test_related_text_scores_high() {
        let context = vec![
            "France is a country in Western Europe. Its capital is Paris, known for the Eiffel Tower."
                .to_string(),
        ];
        let s = score(
            "What is the capital of France?",
            "The capital of France is Paris.",
            &context,
        );
        assert!(s > 0.5, "Grounded answer should score > 0.5, got {}", s);
    }

    #[test]
    fn test_context_enriches_idf() {
        let query = "What is the capital of France?";
        let response = "The capital of France is Paris.";
        let context = vec!["Its capital is Paris, known for the Eiffel Tower.".to_string()];

        let without = score(query, response, &[]);
        let with = score(query, response, &context);

        // Both well-defined; context shifts idf but stays in range
        for s in [without, with] {
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_score_in_range() {
        let cases = [
            ("a", "b"),
            ("the the the", "the"),
            ("42", "42 43 44"),
            ("hello world", "world hello again"),
        ];
        for (q, r) in cases {
            let s = score(q, r, &[]);
            assert!((0.0..=1.0).contains(&s), "score {} out of range for ({}, {})", s, q, r);
        }
    }

    #[test]
    fn test_determinism() {
        let q = "What is the capital of France?";
        let r = "Paris is the capital.";
        let ctx = vec!["Paris.".to_string()];
        assert_eq!(score(q, r, &ctx), score(q, r, &ctx));
    }

    #[test]
    fn test_context_order_does_not_affect_score() {
        let q = "What is the capital of France?";
        let r = "The capital of France is Paris.";
        let a = vec!["France is in Europe.".to_string(), "Paris is its capital.".to_string()];
        let b = vec!["Paris is its capital.".to_string(), "France is in Europe.".to_string()];
        assert_eq!(score(q, r, &a), score(q, r, &b));
    }

    #[test]
    fn test_stopword_only_query_falls_back_to_raw_tokens() {
        // "is it" filters to nothing; raw tokens keep the metric defined
        let s = score("is it", "is it so", &[]);
        assert!(s > 0.0);
        assert!(s <= 1.0);
    }
}
