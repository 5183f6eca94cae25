//! Session quality: time-duration plausibility and bot-likeness.
//!
//! Two quotas, each starting at 1.0 and clamped to `[0, 1]`:
//!
//! - **Time duration** (weight [`ScoringConfig::time_weight`]): penalizes a high
//!   share of short visits (a drastic 0.8 above 75%, otherwise `0.5 * ratio`),
//!   long visits (`0.3 * ratio`) and an out-of-range mean (0.3).
//! - **Bot-likeness** (weight [`ScoringConfig::bot_weight`]): penalizes
//!   near-identical consecutive durations (`0.5 * ratio`) and each run of
//!   consecutive short visits (0.3 per run).
//!
//! The weighted sum is clamped and divided by the total weight.

use tracing::trace;
use trail_core::config::ScoringConfig;
use trail_core::traits::SessionHeuristic;
use trail_core::types::BrowsingEvent;

use crate::normalize::clamp01;
use crate::stats::DurationStats;

/// Short-visit share above which the time quota takes the drastic penalty.
const DRASTIC_SHORT_RATIO: f64 = 0.75;
const DRASTIC_SHORT_PENALTY: f64 = 0.8;
const SHORT_RATIO_PENALTY: f64 = 0.5;
const LONG_RATIO_PENALTY: f64 = 0.3;
const EXTREME_MEAN_PENALTY: f64 = 0.3;
const SIMILAR_RATIO_PENALTY: f64 = 0.5;
const LOW_RUN_PENALTY: f64 = 0.3;

/// [`SessionHeuristic`] wrapper around [`evaluate_quality`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityHeuristic;

impl SessionHeuristic for QualityHeuristic {
    fn name(&self) -> &'static str {
        "quality"
    }

    fn score(&self, events: &[BrowsingEvent], config: &ScoringConfig) -> f64 {
        evaluate_quality(events, config)
    }
}

/// Quality score in `[0, 1]`; `0.0` for an empty session.
pub fn evaluate_quality(events: &[BrowsingEvent], config: &ScoringConfig) -> f64 {
    if events.is_empty() {
        return 0.0;
    }
    let durations: Vec<i64> = events.iter().map(BrowsingEvent::duration_ms).collect();

    let time_quota = time_duration_quota(&durations, config);
    let bot_quota = bot_likeness_quota(&durations, config);

    let time_component = time_quota * config.time_weight;
    let bot_component = bot_quota * config.bot_weight;
    let total_weight = config.time_weight + config.bot_weight;
    trace!(time_component, bot_component, "quality: components");

    // NaN from a zero total maps to 0 in clamp01.
    clamp01((time_component + bot_component) / total_weight)
}

/// Time-duration quota in `[0, 1]`. `durations` must be non-empty.
pub fn time_duration_quota(durations: &[i64], config: &ScoringConfig) -> f64 {
    let n = durations.len() as f64;
    let short = durations.iter().filter(|d| **d < config.min_time_spent_ms).count() as f64;
    let long = durations.iter().filter(|d| **d > config.max_time_spent_ms).count() as f64;

    let mut quota = 1.0;

    let short_ratio = short / n;
    if short_ratio > DRASTIC_SHORT_RATIO {
        quota -= DRASTIC_SHORT_PENALTY;
    } else {
        quota -= SHORT_RATIO_PENALTY * short_ratio;
    }

    let long_ratio = long / n;
    quota -= LONG_RATIO_PENALTY * long_ratio;

    let stats = DurationStats::new(durations);
    if stats.mean_below(config.min_time_spent_ms) || stats.mean_above(config.max_time_spent_ms) {
        quota -= EXTREME_MEAN_PENALTY;
    }

    clamp01(quota)
}

/// Bot-likeness quota in `[0, 1]`.
pub fn bot_likeness_quota(durations: &[i64], config: &ScoringConfig) -> f64 {
    let mut quota = 1.0;

    if durations.len() > 1 {
        let limit = i128::from(config.similar_timing_ms);
        let similar = durations
            .windows(2)
            .filter(|pair| (i128::from(pair[0]) - i128::from(pair[1])).abs() < limit)
            .count();
        let similar_ratio = similar as f64 / (durations.len() - 1) as f64;
        quota -= SIMILAR_RATIO_PENALTY * similar_ratio;
    }

    let low_runs = count_low_runs(durations, config.min_time_spent_ms, config.low_run_length);
    if low_runs > 0 {
        quota -= LOW_RUN_PENALTY * low_runs as f64;
    }

    clamp01(quota)
}

/// Number of maximal runs of at least `run_length` consecutive durations below
/// `threshold`, including a run that ends the series.
pub fn count_low_runs(durations: &[i64], threshold: i64, run_length: usize) -> usize {
    let mut runs = 0;
    let mut current = 0;
    for &d in durations {
        if d < threshold {
            current += 1;
        } else {
            if current >= run_length {
                runs += 1;
            }
            current = 0;
        }
    }
    if current >= run_length {
        runs += 1;
    }
    runs
}
