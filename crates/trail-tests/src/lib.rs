//! Cross-crate test suite for the Trail proof engine.
//!
//! Scenario tests pin the verdicts for known sessions, adversarial tests throw
//! randomized and hostile submissions at the engine, and end-to-end tests run
//! the full directory-in, results-out pipeline.

pub mod helpers;
