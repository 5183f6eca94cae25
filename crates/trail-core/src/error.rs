//! Error types shared across Trail crates.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid duration bounds: min {min} must be below max {max}")] InvalidDurationBounds { min: i64, max: i64 },
    #[error("weight {name} must be finite and non-negative, got {value}")] InvalidWeight { name: &'static str, value: f64 },
    #[error("weights {0} sum to zero")] ZeroWeights(&'static str),
    #[error("{name} must be at least {min}, got {value}")] TooSmall { name: &'static str, min: usize, value: usize },
    #[error("threshold {name} must lie in [0, 1], got {value}")] ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("sigmoid parameter {name} must be finite, got {value}")] NonFiniteSigmoid { name: &'static str, value: f64 },
}
