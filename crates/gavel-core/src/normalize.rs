//! Shared text normalization for all scorers.
//!
//! Every metric tokenizes through this module so that scores stay
//! comparable: lowercase, punctuation stripped, split on non-alphanumeric
//! boundaries. The stopword set is a process-wide read-only singleton,
//! built once and never mutated.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Fixed English stopword set shared by all scorers.
///
/// Function words carry no grounding signal: they are excluded from TF-IDF
/// vectors and concept extraction, and always count as "supported" during
/// claim entailment checks.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
        "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
        "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no",
        "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
        "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
        "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
        "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
        "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
        "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
        "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Whether a normalized token belongs to the fixed stopword set.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Normalize text into a token sequence.
///
/// Lowercases, strips punctuation, and splits on non-alphanumeric
/// boundaries. Digits are kept as tokens. Pure function: identical input
/// always yields identical output, and empty input yields an empty
/// sequence rather than an error.
pub fn normalize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

/// Normalize text and drop stopwords.
pub fn normalize_filtered(text: &str) -> Vec<String> {
    normalize(text)
        .into_iter()
        .filter(|t| !is_stopword(t))
        .collect()
}
