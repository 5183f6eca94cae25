//! Scoring constants. Durations are in milliseconds.
//!
//! These are the defaults behind [`ScoringConfig`](crate::config::ScoringConfig).
//! Heuristics never read them directly; they receive a config instead.

/// Visits shorter than this are "short" (2 seconds).
pub const MIN_TIME_SPENT_MS: i64 = 2_000;
/// Visits longer than this are "long" (30 minutes).
pub const MAX_TIME_SPENT_MS: i64 = 1_800_000;
/// Consecutive durations closer than this are "near-identical".
pub const SIMILAR_TIMING_MS: i64 = 300;
/// Minimum run of consecutive short visits counted as a bot-like block.
pub const LOW_RUN_LENGTH: usize = 3;
/// Sliding-window width for localized anomaly detection.
pub const WINDOW_SIZE: usize = 3;

pub const TIME_WEIGHT: f64 = 60.0;
pub const BOT_WEIGHT: f64 = 40.0;

/// Starting value of the integer authenticity score.
pub const MAX_AUTHENTICITY_SCORE: f64 = 100.0;

/// Sigmoid steepness.
pub const SIGMOID_K: f64 = 5.0;
/// Sigmoid midpoint.
pub const SIGMOID_X0: f64 = 0.5;

pub const HIGH_AUTHENTICITY_THRESHOLD: f64 = 0.8;
pub const MODERATE_AUTHENTICITY_THRESHOLD: f64 = 0.3;
/// Authenticity-mode validity gate, in percent of the final score.
pub const MODERATE_QUALITY_THRESHOLD_PCT: u8 = 30;

/// Multiplier applied to `url_count + minutes` when computing points.
pub const EARLY_BONUS_MULTIPLIER: i64 = 3;

/// Authenticity-mode combiner weights.
pub const QUALITY_WEIGHT: f64 = 0.5;
pub const AUTHENTICITY_WEIGHT: f64 = 0.5;

pub const LABEL_HIGH: &str = "High Authentic Browsing";
pub const LABEL_MODERATE: &str = "Moderate quality, Some traits of human browsing";
pub const LABEL_LOW: &str = "Low quality, Potentially Non-Human Browsing";
