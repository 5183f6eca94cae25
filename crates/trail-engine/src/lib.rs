//! # trail-engine — Proof generation for one submission.
//!
//! Loads [`EngineConfig`], finds and opens the submission in the input
//! directory, runs every scoring and verification component and assembles
//! the [`ProofResponse`](trail_core::ProofResponse).

pub mod config;
pub mod error;
pub mod input;
pub mod proof;
pub mod verdict;

pub use config::EngineConfig;
pub use error::EngineError;
pub use input::{find_input_file, load_submission, parse_submission};
pub use proof::ProofEngine;
pub use verdict::{assemble, evaluate, is_valid};
