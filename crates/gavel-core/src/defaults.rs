//! Centralized default constants for the gavel evaluation engine.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates should reference these constants instead of defining
//! their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// VERDICT THRESHOLDS
// =============================================================================

/// Minimum relevance score for a passing verdict.
pub const RELEVANCE_MIN: f64 = 0.5;

/// Minimum completeness score for a passing verdict.
pub const COMPLETENESS_MIN: f64 = 0.5;

/// Maximum hallucination score for a passing verdict (lower is better).
pub const HALLUCINATION_MAX: f64 = 0.5;

// =============================================================================
// SCORING
// =============================================================================

/// Scoring deadline in milliseconds. The product latency budget is
/// sub-200ms per evaluation; scoring that exceeds this is aborted and
/// surfaced as a timeout rather than returning a partial result.
pub const SCORING_TIMEOUT_MS: u64 = 200;

/// Smallest claim n-gram extracted from the response.
pub const CLAIM_NGRAM_MIN: usize = 2;

/// Largest claim n-gram extracted from the response.
pub const CLAIM_NGRAM_MAX: usize = 4;

/// Fraction of a claim's tokens that must appear in context for the claim
/// to count as supported when no contiguous match exists.
pub const CLAIM_SUPPORT_FRACTION: f64 = 0.8;

/// Credit granted to a query concept found only in context (paraphrase
/// enrichment). Full credit requires the concept in the response itself.
pub const CONTEXT_CONCEPT_CREDIT: f64 = 0.5;

/// Decimal places kept on reported metric scores.
pub const SCORE_DECIMALS: u32 = 4;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 8000;

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

/// Environment variable overriding [`RELEVANCE_MIN`].
pub const ENV_RELEVANCE_MIN: &str = "GAVEL_RELEVANCE_MIN";

/// Environment variable overriding [`COMPLETENESS_MIN`].
pub const ENV_COMPLETENESS_MIN: &str = "GAVEL_COMPLETENESS_MIN";

/// Environment variable overriding [`HALLUCINATION_MAX`].
pub const ENV_HALLUCINATION_MAX: &str = "GAVEL_HALLUCINATION_MAX";

/// Environment variable overriding [`SCORING_TIMEOUT_MS`].
pub const ENV_SCORING_TIMEOUT_MS: &str = "GAVEL_SCORING_TIMEOUT_MS";
