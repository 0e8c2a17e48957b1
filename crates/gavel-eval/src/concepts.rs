//! Deterministic key-term extraction.
//!
//! Concepts are the "required" terms of a query: numeric tokens and
//! capitalized words or phrases (consecutive capitalized words merge into
//! one phrase, so "Eiffel Tower" is a single concept). The same extraction
//! runs on query and response text, which is what makes coverage ratios
//! meaningful.
//!
//! No NER model is involved; extraction is a pure function of the text.

use gavel_core::normalize::{is_stopword, normalize};

/// A single extracted concept as a normalized token sequence.
///
/// Single-token concepts match when the token occurs anywhere in the
/// target; multi-token phrases must occur contiguously.
pub type Concept = Vec<String>;

/// Extract required concepts from text, in first-occurrence order without
/// duplicates.
///
/// Rules:
/// - a word starting with an uppercase letter contributes to a capitalized
///   phrase, unless its lowercase form is a stopword (drops sentence-initial
///   "What", "The", ...)
/// - consecutive capitalized words merge into one phrase
/// - every token containing a digit is a standalone numeric concept
pub fn extract_concepts(text: &str) -> Vec<Concept> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut concepts: Vec<Concept> = Vec::new();

    let mut i = 0;
    while i < words.len() {
        if !starts_uppercase(words[i]) {
            i += 1;
            continue;
        }

        let mut phrase: Concept = Vec::new();
        while i < words.len() && starts_uppercase(words[i]) {
            let word = words[i];
            for token in normalize(word) {
                if !is_stopword(&token) {
                    phrase.push(token);
                }
            }
            i += 1;
            // Trailing punctuation ends the phrase: "Paris," never merges
            // with a following capitalized word.
            if ends_with_punctuation(word) {
                break;
            }
        }
        if !phrase.is_empty() {
            push_unique(&mut concepts, phrase);
        }
    }

    for token in normalize(text) {
        if token.chars().any(|c| c.is_ascii_digit()) {
            push_unique(&mut concepts, vec![token]);
        }
    }

    concepts
}

/// Whether a concept occurs in a token sequence: contiguous match for
/// phrases, simple membership for single tokens.
pub fn contains_concept(tokens: &[String], concept: &[String]) -> bool {
    if concept.is_empty() || concept.len() > tokens.len() {
        return false;
    }
    tokens.windows(concept.len()).any(|w| w == concept)
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_uppercase())
}

fn ends_with_punctuation(word: &str) -> bool {
    word.chars().last().is_some_and(|c| !c.is_alphanumeric())
}

fn push_unique(concepts: &mut Vec<Concept>, concept: Concept) {
    if !concepts.contains(&concept) {
        concepts.push(concept);
    }
}
