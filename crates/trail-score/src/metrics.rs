//! Metrics recalculation and the honesty check.
//!
//! `points = floor((url_count + total_seconds / 60) * EARLY_BONUS_MULTIPLIER)`,
//! where each event contributes `floor(timeSpent_ms / 1000)` seconds.

use trail_core::config::ScoringConfig;
use trail_core::types::{BrowsingEvent, ClaimedMetrics, RecalculatedMetrics};

/// Recompute canonical metrics from the raw event log.
pub fn recalculate_metrics(events: &[BrowsingEvent], config: &ScoringConfig) -> RecalculatedMetrics {
    let time_spent: Vec<i64> = events
        .iter()
        .map(|e| e.duration_ms().div_euclid(1000))
        .collect();
    let total_seconds = time_spent.iter().fold(0i64, |acc, s| acc.saturating_add(*s));
    let url_count = events.len() as i64;

    let points = ((url_count as f64 + total_seconds as f64 / 60.0)
        * config.early_bonus_multiplier as f64)
        .floor() as i64;

    RecalculatedMetrics {
        url_count,
        time_spent,
        points,
    }
}

/// Exact equality on points, url count and the ordered per-event seconds.
pub fn verify_metrics(recalculated: &RecalculatedMetrics, claimed: &ClaimedMetrics) -> bool {
    recalculated.points == claimed.points
        && recalculated.url_count == claimed.url_count
        && recalculated.time_spent == claimed.time_spent
}

/// Honesty as a score: 1.0 on an exact match, 0.0 otherwise (including an
/// unparseable claim).
pub fn honesty_score(recalculated: &RecalculatedMetrics, claimed: Option<&ClaimedMetrics>) -> f64 {
    match claimed {
        Some(claimed) if verify_metrics(recalculated, claimed) => 1.0,
        _ => 0.0,
    }
}
