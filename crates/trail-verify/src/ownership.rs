//! Signer recovery for the ownership check.
//!
//! The challenge string is hashed with the Ethereum personal-message prefix
//! (`"\x19Ethereum Signed Message:\n" || len || bytes`) under Keccak-256. The
//! 65-byte signature `r || s || v` is recovered to a secp256k1 public key and
//! the address is the last 20 bytes of the Keccak-256 of its uncompressed
//! coordinates. Addresses compare case-insensitively.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};
use tracing::{debug, warn};

use crate::error::OwnershipError;

const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";
const SIGNATURE_LEN: usize = 65;

/// Result of an ownership check. Only `Verified` scores 1.0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnershipOutcome {
    Verified,
    Mismatched { recovered: String },
    Malformed(OwnershipError),
}

impl OwnershipOutcome {
    pub fn score(&self) -> f64 {
        match self {
            Self::Verified => 1.0,
            Self::Mismatched { .. } | Self::Malformed(_) => 0.0,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

/// Keccak-256 of the prefixed personal message.
pub fn personal_message_hash(message: &str) -> [u8; 32] {
    let bytes = message.as_bytes();
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX.as_bytes());
    hasher.update(bytes.len().to_string().as_bytes());
    hasher.update(bytes);
    hasher.finalize().into()
}

/// `0x`-prefixed lowercase address of a public key.
pub fn address_of(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(false);
    let digest = Keccak256::digest(&point.as_bytes()[1..]);
    format!("0x{}", hex::encode(&digest[12..]))
}

fn recovery_id(v: u8) -> Result<u8, OwnershipError> {
    match v {
        0 | 1 => Ok(v),
        27 | 28 => Ok(v - 27),
        35.. => Ok((v - 35) % 2),
        _ => Err(OwnershipError::InvalidRecoveryId(v)),
    }
}

/// Recover the address that signed `message`. `signature_hex` may carry a
/// `0x` prefix. High-s signatures are normalized before recovery.
pub fn recover_address(message: &str, signature_hex: &str) -> Result<String, OwnershipError> {
    let stripped = signature_hex
        .strip_prefix("0x")
        .or_else(|| signature_hex.strip_prefix("0X"))
        .unwrap_or(signature_hex);
    let bytes = hex::decode(stripped).map_err(|e| OwnershipError::InvalidHex(e.to_string()))?;
    if bytes.len() != SIGNATURE_LEN {
        return Err(OwnershipError::InvalidLength(bytes.len()));
    }

    let mut signature =
        Signature::from_slice(&bytes[..64]).map_err(|_| OwnershipError::InvalidSignature)?;
    let recid_byte = recovery_id(bytes[64])?;
    let mut recid =
        RecoveryId::from_byte(recid_byte).ok_or(OwnershipError::InvalidRecoveryId(bytes[64]))?;

    // Negating s mirrors R, so the y-parity flips with it.
    if let Some(normalized) = signature.normalize_s() {
        signature = normalized;
        recid = RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced());
    }

    let prehash = personal_message_hash(message);
    let key = VerifyingKey::recover_from_prehash(&prehash, &signature, recid)
        .map_err(|_| OwnershipError::RecoveryFailed)?;
    Ok(address_of(&key))
}

/// Empty strings count as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Check that `signature` over `challenge` was produced by `author`.
///
/// Any missing or empty input, malformed signature or failed recovery yields
/// [`OwnershipOutcome::Malformed`]; none of them is an error to the caller.
pub fn verify_ownership(
    author: Option<&str>,
    signature: Option<&str>,
    challenge: Option<&str>,
) -> OwnershipOutcome {
    let fields = (present(author), present(signature), present(challenge));
    let (author, signature, challenge) = match fields {
        (Some(a), Some(s), Some(c)) => (a, s, c),
        (a, s, c) => {
            let missing: Vec<&'static str> = [
                ("author", a),
                ("signature", s),
                ("random_string", c),
            ]
            .into_iter()
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| name)
            .collect();
            let err = OwnershipError::MissingFields(missing);
            warn!(error = %err, "ownership: check skipped");
            return OwnershipOutcome::Malformed(err);
        }
    };

    match recover_address(challenge, signature) {
        Ok(recovered) if recovered.to_lowercase() == author.to_lowercase() => {
            debug!(address = %recovered, "ownership: signer matches author");
            OwnershipOutcome::Verified
        }
        Ok(recovered) => {
            warn!(%author, %recovered, "ownership: signer does not match author");
            OwnershipOutcome::Mismatched { recovered }
        }
        Err(err) => {
            warn!(error = %err, "ownership: signature rejected");
            OwnershipOutcome::Malformed(err)
        }
    }
}
