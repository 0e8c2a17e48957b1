//! Verdict aggregation: threshold policy → status + reasons.
//!
//! Thresholds are injected configuration, never globals. Reasons are
//! deterministic given `(metrics, thresholds)`: exactly one per metric, in
//! fixed order relevance → completeness → hallucination.

use gavel_core::config::Thresholds;
use gavel_core::models::{Metrics, Verdict, VerdictStatus};

/// Aggregate metrics into a verdict. `FAIL` iff at least one metric
/// breaches its threshold.
pub fn aggregate(metrics: &Metrics, thresholds: &Thresholds) -> Verdict {
    let mut reasons = Vec::with_capacity(3);
    let mut failed = false;

    if metrics.relevance < thresholds.relevance_min {
        failed = true;
        reasons.push(format!(
            "Low relevance score: {:.2} < {:.2}",
            metrics.relevance, thresholds.relevance_min
        ));
    } else {
        reasons.push(format!("High relevance score: {:.2}", metrics.relevance));
    }

    if metrics.completeness < thresholds.completeness_min {
        failed = true;
        reasons.push(format!(
            "Low completeness score: {:.2} < {:.2}",
            metrics.completeness, thresholds.completeness_min
        ));
    } else {
        reasons.push(format!(
            "High completeness score: {:.2}",
            metrics.completeness
        ));
    }

    if metrics.hallucination > thresholds.hallucination_max {
        failed = true;
        reasons.push(format!(
            "High hallucination score: {:.2} > {:.2}",
            metrics.hallucination, thresholds.hallucination_max
        ));
    } else {
        reasons.push(format!(
            "Low hallucination score: {:.2}",
            metrics.hallucination
        ));
    }

    Verdict {
        status: if failed {
            VerdictStatus::Fail
        } else {
            VerdictStatus::Pass
        },
        reasons,
    }
}
