//! Verification error types.

use thiserror::Error;

/// Why a signature could not be checked. Never fatal: every variant collapses
/// to an ownership score of 0.0.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OwnershipError {
    /// Author, signature or challenge absent or empty.
    #[error("missing ownership verification data: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Signature is not valid hex.
    #[error("signature is not hex: {0}")]
    InvalidHex(String),

    /// Signature is not 65 bytes.
    #[error("signature must be 65 bytes, got {0}")]
    InvalidLength(usize),

    /// Unsupported `v` byte.
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// `r` or `s` out of range.
    #[error("invalid signature scalars")]
    InvalidSignature,

    /// No public key recovers from this signature and message.
    #[error("public key recovery failed")]
    RecoveryFailed,
}

/// Errors opening an encrypted submission envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The signed message used as key material is not hex.
    #[error("signed message is not valid hex")]
    InvalidKeyHex,

    /// A base64 field could not be decoded.
    #[error("invalid base64 in {0}")]
    InvalidBase64(&'static str),

    /// AES-GCM nonce must be 12 bytes.
    #[error("invalid nonce length: {0} (expected 12)")]
    InvalidNonceLength(usize),

    /// Authentication tag mismatch or wrong key.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Encryption failure.
    #[error("encryption: {0}")]
    Encryption(String),
}
