//! Score combination, sigmoid normalization, rounding and labeling.

use trail_core::config::{ScoringConfig, ScoringMode};
use trail_core::types::Label;

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Logistic curve `1 / (1 + e^(-k (x - x0)))`.
///
/// `sigmoid(x0, k, x0) == 0.5` exactly.
pub fn sigmoid(x: f64, k: f64, x0: f64) -> f64 {
    let z = k * (x - x0);
    1.0 / (1.0 + (-z).exp())
}

/// Raw score for the active mode, in `[0, 1]`.
///
/// Correctness mode uses quality alone. Authenticity mode takes the weighted
/// mean of quality and authenticity.
pub fn combine(quality: f64, authenticity: f64, config: &ScoringConfig) -> f64 {
    match config.mode {
        ScoringMode::Correctness => clamp01(quality),
        ScoringMode::Authenticity => {
            let total = config.quality_weight + config.authenticity_weight;
            if total <= 0.0 {
                return 0.0;
            }
            clamp01(
                (quality * config.quality_weight + authenticity * config.authenticity_weight)
                    / total,
            )
        }
    }
}

/// Label for a normalized score.
pub fn label_for(score: f64, config: &ScoringConfig) -> Label {
    if score >= config.high_threshold {
        Label::High
    } else if score >= config.moderate_threshold {
        Label::Moderate
    } else {
        Label::Low
    }
}

/// Round to two decimals, ties to even on the exact binary value.
///
/// Goes through decimal formatting, which is correctly rounded, so `0.125`
/// becomes `0.12` and `2.675` (stored as 2.67499…) becomes `2.67`.
pub fn round2(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    format!("{x:.2}").parse().unwrap_or(x)
}
