//! # trail-score — Behavioral scoring for browsing sessions.
//!
//! Every function in this crate is pure: no I/O, no shared state, and
//! identical output for identical input.
//!
//! - **Metrics**: recompute `url_count`, per-event seconds and points from the
//!   event log, and compare them to the submitter's claim (honesty).
//! - **Correctness**: schema validity of the event log.
//! - **Quality**: time-duration plausibility (60%) and bot-likeness (40%).
//! - **Authenticity**: a 0–100 score moved by continuity, sliding-window,
//!   timing-uniformity and segment-uniformity signals.
//! - **Normalize**: combine sub-scores per mode, apply the sigmoid, round and
//!   label.

pub mod authenticity;
pub mod correctness;
pub mod metrics;
pub mod normalize;
pub mod quality;
mod stats;

pub use authenticity::{AuthenticityHeuristic, evaluate_authenticity};
pub use correctness::evaluate_correctness;
pub use metrics::{honesty_score, recalculate_metrics, verify_metrics};
pub use normalize::{clamp01, combine, label_for, round2, sigmoid};
pub use quality::{QualityHeuristic, evaluate_quality};
