//! AES-256-GCM submission envelope.
//!
//! An encrypted input file is a JSON object `{"encrypted_data": b64, "iv": b64}`.
//! The key is the SHA-256 of the hex-decoded signed message. The ciphertext
//! carries the 16-byte GCM tag at its end and there is no associated data.
//! The plaintext is the submission JSON.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::EnvelopeError;

/// AES-GCM nonce size in bytes.
pub const NONCE_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    pub encrypted_data: String,
    pub iv: String,
}

impl EncryptedEnvelope {
    /// Recognize an envelope: an object whose `encrypted_data` and `iv` are
    /// both strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        let encrypted_data = value.get("encrypted_data")?.as_str()?;
        let iv = value.get("iv")?.as_str()?;
        Some(Self {
            encrypted_data: encrypted_data.to_string(),
            iv: iv.to_string(),
        })
    }

    /// Decrypt with the key derived from `signed_message`.
    pub fn open(&self, signed_message: &str) -> Result<Vec<u8>, EnvelopeError> {
        let nonce_bytes = STANDARD
            .decode(&self.iv)
            .map_err(|_| EnvelopeError::InvalidBase64("iv"))?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(EnvelopeError::InvalidNonceLength(nonce_bytes.len()));
        }
        let ciphertext = STANDARD
            .decode(&self.encrypted_data)
            .map_err(|_| EnvelopeError::InvalidBase64("encrypted_data"))?;

        let key = derive_key(signed_message)?;
        let cipher = Aes256Gcm::new_from_slice(key.as_slice())
            .map_err(|_| EnvelopeError::DecryptionFailed)?;
        let plaintext = cipher
            .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_slice())
            .map_err(|_| EnvelopeError::DecryptionFailed)?;
        debug!(bytes = plaintext.len(), "envelope opened");
        Ok(plaintext)
    }

    /// Encrypt `plaintext` under the key derived from `signed_message`.
    pub fn seal(
        plaintext: &[u8],
        signed_message: &str,
        nonce: [u8; NONCE_LEN],
    ) -> Result<Self, EnvelopeError> {
        let key = derive_key(signed_message)?;
        let cipher = Aes256Gcm::new_from_slice(key.as_slice())
            .map_err(|e| EnvelopeError::Encryption(e.to_string()))?;
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|e| EnvelopeError::Encryption(e.to_string()))?;
        Ok(Self {
            encrypted_data: STANDARD.encode(ciphertext),
            iv: STANDARD.encode(nonce),
        })
    }
}

/// SHA-256 of the hex-decoded signed message. A `0x` prefix is accepted.
pub fn derive_key(signed_message: &str) -> Result<Zeroizing<[u8; 32]>, EnvelopeError> {
    let stripped = signed_message
        .strip_prefix("0x")
        .or_else(|| signed_message.strip_prefix("0X"))
        .unwrap_or(signed_message);
    let material =
        Zeroizing::new(hex::decode(stripped).map_err(|_| EnvelopeError::InvalidKeyHex)?);
    let mut key = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&Sha256::digest(material.as_slice()));
    Ok(key)
}
