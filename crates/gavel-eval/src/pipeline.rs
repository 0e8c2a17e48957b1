//! Evaluation orchestrator: the sole public entrypoint of the engine.
//!
//! Validates the request, runs the three scorers concurrently on the
//! blocking pool, enforces a single deadline around the whole scoring
//! stage, and aggregates the metrics into a verdict. Each call is fully
//! independent; the orchestrator holds only immutable configuration.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info};

use gavel_core::config::EvalConfig;
use gavel_core::defaults::SCORE_DECIMALS;
use gavel_core::error::{Error, Result};
use gavel_core::models::{EvaluationRequest, EvaluationResult, Metrics};

use crate::aggregate::aggregate;
use crate::{completeness, hallucination, relevance};

/// The evaluation engine. Cheap to clone; safe to share across tasks.
#[derive(Debug, Clone)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    /// Create an evaluator with an explicit configuration.
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluate one `(query, response, context)` triple.
    ///
    /// Returns `Error::Validation` when query or response is empty,
    /// `Error::Timeout` when scoring exceeds the configured deadline, and
    /// `Error::Scoring` when any scorer fails — a single failed metric
    /// fails the whole evaluation rather than substituting a default.
    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluationResult> {
        if request.query.trim().is_empty() {
            return Err(Error::Validation("query must not be empty".to_string()));
        }
        if request.response.trim().is_empty() {
            return Err(Error::Validation("response must not be empty".to_string()));
        }

        let budget_ms = self.config.timeout_ms;
        let started = Instant::now();

        // Cancellation is cooperative and coarse-grained: one deadline
        // wraps all three stages. Blocking tasks that outlive the deadline
        // finish in the background and are discarded.
        let (relevance, completeness, hallucination) = tokio::time::timeout(
            Duration::from_millis(budget_ms),
            score_all(request.clone()),
        )
        .await
        .map_err(|_| Error::Timeout { budget_ms })??;

        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        let metrics = Metrics {
            relevance: round_score(relevance),
            completeness: round_score(completeness),
            hallucination: round_score(hallucination),
            latency_ms: (latency_ms * 100.0).round() / 100.0,
        };
        let verdict = aggregate(&metrics, &self.config.thresholds);

        info!(
            op = "evaluate",
            duration_ms = metrics.latency_ms,
            context_count = request.context.len(),
            verdict = %verdict.status,
            "evaluation complete"
        );

        Ok(EvaluationResult { metrics, verdict })
    }
}

/// Run the three scorers concurrently. They are logically independent and
/// CPU-bound, so each goes to the blocking pool; all three are joined
/// before aggregation.
async fn score_all(request: EvaluationRequest) -> Result<(f64, f64, f64)> {
    let request = Arc::new(request);

    let rel = {
        let req = Arc::clone(&request);
        tokio::task::spawn_blocking(move || {
            relevance::score(&req.query, &req.response, &req.context)
        })
    };
    let comp = {
        let req = Arc::clone(&request);
        tokio::task::spawn_blocking(move || {
            completeness::score(&req.query, &req.response, &req.context)
        })
    };
    let hall = {
        let req = Arc::clone(&request);
        tokio::task::spawn_blocking(move || hallucination::score(&req.response, &req.context))
    };

    let (rel, comp, hall) = tokio::join!(rel, comp, hall);

    Ok((
        rel.map_err(|e| scorer_failure("relevance", e))?,
        comp.map_err(|e| scorer_failure("completeness", e))?,
        hall.map_err(|e| scorer_failure("hallucination", e))?,
    ))
}

fn scorer_failure(component: &'static str, err: tokio::task::JoinError) -> Error {
    error!(component = component, error = %err, "scorer failed");
    Error::Scoring(format!("{component} scorer failed"))
}

/// Clamp to `[0, 1]` and round to the reported precision. Non-finite
/// values collapse to 0.0 so the range invariant holds unconditionally.
fn round_score(score: f64) -> f64 {
    let clamped = if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let factor = 10f64.powi(SCORE_DECIMALS as i32);
    (clamped * factor).round() / factor
}
