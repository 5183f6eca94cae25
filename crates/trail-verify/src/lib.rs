//! # trail-verify — Cryptographic checks on a submission.
//!
//! - [`integrity`] — SHA-256 digest of the raw event log against `data_hash`
//! - [`ownership`] — recover the signer of the challenge and compare to the author
//! - [`envelope`] — open (and seal) the AES-256-GCM submission envelope

pub mod envelope;
pub mod error;
pub mod integrity;
pub mod ownership;

pub use envelope::EncryptedEnvelope;
pub use error::{EnvelopeError, OwnershipError};
pub use integrity::{compute_data_hash, verify_integrity};
pub use ownership::{OwnershipOutcome, recover_address, verify_ownership};
