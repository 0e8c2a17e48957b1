//! Structured logging schema and field name constants for gavel.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Scorer failure, evaluation aborted |
//! | WARN  | Recoverable issue, fallback applied (invalid config value) |
//! | INFO  | Lifecycle events (startup, shutdown), evaluation completions |
//! | DEBUG | Decision points, intermediate metric values |
//! | TRACE | Per-claim / per-concept iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated from the transport layer.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Component within the engine.
/// Examples: "relevance", "completeness", "hallucination", "pipeline"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "evaluate", "aggregate", "ingest"
pub const OPERATION: &str = "op";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Character length of the query.
pub const QUERY_LEN: &str = "query_len";

/// Character length of the response under evaluation.
pub const RESPONSE_LEN: &str = "response_len";

/// Number of context passages supplied.
pub const CONTEXT_COUNT: &str = "context_count";

/// Number of claims extracted from a response.
pub const CLAIM_COUNT: &str = "claim_count";

/// Number of concepts extracted from a query.
pub const CONCEPT_COUNT: &str = "concept_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Final verdict status ("PASS" / "FAIL").
pub const VERDICT: &str = "verdict";

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
