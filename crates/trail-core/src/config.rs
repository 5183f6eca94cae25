//! Threshold and weight configuration for the scoring heuristics.
//!
//! Every heuristic takes a [`ScoringConfig`] by reference rather than reading
//! module constants, so alternate threshold sets can be exercised side by side.
//! [`ScoringConfig::default`] reproduces the values in [`crate::constants`].

use serde::{Deserialize, Serialize};

use crate::constants::{
    AUTHENTICITY_WEIGHT, BOT_WEIGHT, EARLY_BONUS_MULTIPLIER, HIGH_AUTHENTICITY_THRESHOLD,
    LOW_RUN_LENGTH, MAX_TIME_SPENT_MS, MIN_TIME_SPENT_MS, MODERATE_AUTHENTICITY_THRESHOLD,
    MODERATE_QUALITY_THRESHOLD_PCT, QUALITY_WEIGHT, SIGMOID_K, SIGMOID_X0, SIMILAR_TIMING_MS,
    TIME_WEIGHT, WINDOW_SIZE,
};
use crate::error::CoreError;

/// Which sub-scores feed the final score and which signals gate validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Final score from quality alone; validity requires ownership, honesty,
    /// integrity and schema correctness.
    #[default]
    Correctness,
    /// Final score from a weighted blend of quality and authenticity;
    /// validity requires ownership and honesty.
    Authenticity,
}

/// Immutable set of thresholds and weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub mode: ScoringMode,
    pub min_time_spent_ms: i64,
    pub max_time_spent_ms: i64,
    pub similar_timing_ms: i64,
    pub low_run_length: usize,
    pub window_size: usize,
    pub time_weight: f64,
    pub bot_weight: f64,
    pub sigmoid_k: f64,
    pub sigmoid_x0: f64,
    pub high_threshold: f64,
    pub moderate_threshold: f64,
    pub moderate_quality_threshold_pct: u8,
    pub early_bonus_multiplier: i64,
    pub quality_weight: f64,
    pub authenticity_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mode: ScoringMode::default(),
            min_time_spent_ms: MIN_TIME_SPENT_MS,
            max_time_spent_ms: MAX_TIME_SPENT_MS,
            similar_timing_ms: SIMILAR_TIMING_MS,
            low_run_length: LOW_RUN_LENGTH,
            window_size: WINDOW_SIZE,
            time_weight: TIME_WEIGHT,
            bot_weight: BOT_WEIGHT,
            sigmoid_k: SIGMOID_K,
            sigmoid_x0: SIGMOID_X0,
            high_threshold: HIGH_AUTHENTICITY_THRESHOLD,
            moderate_threshold: MODERATE_AUTHENTICITY_THRESHOLD,
            moderate_quality_threshold_pct: MODERATE_QUALITY_THRESHOLD_PCT,
            early_bonus_multiplier: EARLY_BONUS_MULTIPLIER,
            quality_weight: QUALITY_WEIGHT,
            authenticity_weight: AUTHENTICITY_WEIGHT,
        }
    }
}

impl ScoringConfig {
    /// Default thresholds with the given mode.
    pub fn with_mode(mode: ScoringMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Minimum final score for a valid verdict under the active mode.
    pub fn validity_threshold(&self) -> f64 {
        match self.mode {
            ScoringMode::Correctness => self.moderate_threshold,
            ScoringMode::Authenticity => f64::from(self.moderate_quality_threshold_pct) / 100.0,
        }
    }

    /// Reject threshold sets the heuristics cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.min_time_spent_ms >= self.max_time_spent_ms {
            return Err(CoreError::InvalidDurationBounds {
                min: self.min_time_spent_ms,
                max: self.max_time_spent_ms,
            });
        }
        if self.window_size < 1 {
            return Err(CoreError::TooSmall { name: "window_size", min: 1, value: self.window_size });
        }
        if self.low_run_length < 1 {
            return Err(CoreError::TooSmall {
                name: "low_run_length",
                min: 1,
                value: self.low_run_length,
            });
        }

        for (name, value) in [
            ("time_weight", self.time_weight),
            ("bot_weight", self.bot_weight),
            ("quality_weight", self.quality_weight),
            ("authenticity_weight", self.authenticity_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidWeight { name, value });
            }
        }
        if self.time_weight + self.bot_weight == 0.0 {
            return Err(CoreError::ZeroWeights("time_weight + bot_weight"));
        }
        if self.quality_weight + self.authenticity_weight == 0.0 {
            return Err(CoreError::ZeroWeights("quality_weight + authenticity_weight"));
        }

        for (name, value) in [("sigmoid_k", self.sigmoid_k), ("sigmoid_x0", self.sigmoid_x0)] {
            if !value.is_finite() {
                return Err(CoreError::NonFiniteSigmoid { name, value });
            }
        }
        for (name, value) in [
            ("high_threshold", self.high_threshold),
            ("moderate_threshold", self.moderate_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::ThresholdOutOfRange { name, value });
            }
        }
        if self.moderate_quality_threshold_pct > 100 {
            return Err(CoreError::ThresholdOutOfRange {
                name: "moderate_quality_threshold_pct",
                value: f64::from(self.moderate_quality_threshold_pct),
            });
        }

        Ok(())
    }
}
