//! Trait interfaces for the Trail engine.
//!
//! - [`SessionHeuristic`] — a pure behavioral score over an event log
//!   (trail-score implements quality and authenticity)

use crate::config::ScoringConfig;
use crate::types::BrowsingEvent;

/// Pure scoring of an ordered event log.
///
/// Implementations must be deterministic, must not perform I/O and must
/// return a value in `[0, 1]`; an empty log scores `0.0`. No heuristic may
/// observe another's intermediate state, so any set of them can be evaluated
/// in any order.
pub trait SessionHeuristic: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Score the session under the given thresholds.
    fn score(&self, events: &[BrowsingEvent], config: &ScoringConfig) -> f64;
}
