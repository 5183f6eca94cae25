//! # trail-core
//! Foundation types, thresholds and traits for the Trail proof engine.

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
pub mod url;

pub use config::{ScoringConfig, ScoringMode};
pub use error::CoreError;
pub use traits::SessionHeuristic;
pub use types::{
    BrowsingEvent, ClaimedMetrics, Label, ProofResponse, RawSubmission, RecalculatedMetrics,
    ScoreBundle,
};
