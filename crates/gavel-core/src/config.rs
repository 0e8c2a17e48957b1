//! Engine configuration: verdict thresholds and the scoring deadline.
//!
//! Configuration is an explicit immutable value handed to the orchestrator
//! at construction time. It is read from the environment once at startup;
//! nothing hot-reloads mid-request.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Verdict thresholds for the three metrics.
///
/// A metric breaches when `relevance < relevance_min`,
/// `completeness < completeness_min`, or `hallucination > hallucination_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum relevance score (0.0 to 1.0).
    pub relevance_min: f64,
    /// Minimum completeness score (0.0 to 1.0).
    pub completeness_min: f64,
    /// Maximum hallucination score (0.0 to 1.0, lower is better).
    pub hallucination_max: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            relevance_min: defaults::RELEVANCE_MIN,
            completeness_min: defaults::COMPLETENESS_MIN,
            hallucination_max: defaults::HALLUCINATION_MAX,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Verdict thresholds.
    pub thresholds: Thresholds,
    /// Scoring deadline in milliseconds. Scoring that exceeds this is
    /// aborted and surfaced as a timeout error.
    pub timeout_ms: u64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            timeout_ms: defaults::SCORING_TIMEOUT_MS,
        }
    }
}

impl EvalConfig {
    /// Load configuration from environment variables with fallback to
    /// defaults. Invalid values are logged and ignored; thresholds are
    /// clamped to `[0, 1]`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.thresholds.relevance_min =
            env_score(defaults::ENV_RELEVANCE_MIN, config.thresholds.relevance_min);
        config.thresholds.completeness_min = env_score(
            defaults::ENV_COMPLETENESS_MIN,
            config.thresholds.completeness_min,
        );
        config.thresholds.hallucination_max = env_score(
            defaults::ENV_HALLUCINATION_MAX,
            config.thresholds.hallucination_max,
        );

        if let Ok(val) = std::env::var(defaults::ENV_SCORING_TIMEOUT_MS) {
            match val.parse::<u64>() {
                Ok(ms) if ms > 0 => config.timeout_ms = ms,
                _ => {
                    tracing::warn!(
                        value = %val,
                        var = defaults::ENV_SCORING_TIMEOUT_MS,
                        "Invalid scoring timeout, using default"
                    );
                }
            }
        }

        config
    }
}

/// Parse a score-valued env var, clamped to `[0, 1]`.
fn env_score(var: &str, default: f64) -> f64 {
    match std::env::var(var) {
        Ok(val) => match val.parse::<f64>() {
            Ok(s) if s.is_finite() => s.clamp(0.0, 1.0),
            _ => {
                tracing::warn!(value = %val, var = var, "Invalid threshold, using default");
                default
            }
        },
        Err(_) => default,
    }
}
