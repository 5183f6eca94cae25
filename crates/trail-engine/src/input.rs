//! Submission discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};
use trail_core::RawSubmission;
use trail_verify::EncryptedEnvelope;

use crate::error::EngineError;

const INPUT_EXTENSIONS: [&str; 2] = ["json", "zip"];

/// `true` for file names ending in `.json` or `.zip`, any case.
pub fn is_submission_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| INPUT_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// The first submission file in `dir`, by name.
pub fn find_input_file(dir: &Path) -> Result<PathBuf, EngineError> {
    let entries = fs::read_dir(dir).map_err(|e| EngineError::io(dir, e))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| EngineError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && is_submission_file(&path) {
            candidates.push(path);
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Err(EngineError::NoInput(dir.to_path_buf())),
        1 => Ok(candidates.swap_remove(0)),
        n => {
            warn!(count = n, dir = %dir.display(), "multiple input files found, using the first");
            Ok(candidates.swap_remove(0))
        }
    }
}

/// Parse submission bytes, opening an encrypted envelope if that is what
/// they contain.
pub fn parse_submission(
    bytes: &[u8],
    signed_message: Option<&str>,
) -> Result<RawSubmission, EngineError> {
    let value: Value = serde_json::from_slice(bytes)?;

    let Some(envelope) = EncryptedEnvelope::from_value(&value) else {
        return Ok(RawSubmission::from_value(&value));
    };

    let key = signed_message
        .filter(|s| !s.is_empty())
        .ok_or(EngineError::MissingSignedMessage)?;
    let plaintext = envelope.open(key)?;
    let inner: Value = serde_json::from_slice(&plaintext)?;
    debug!("submission decrypted");
    Ok(RawSubmission::from_value(&inner))
}

/// Read and parse the submission at `path`.
pub fn load_submission(
    path: &Path,
    signed_message: Option<&str>,
) -> Result<RawSubmission, EngineError> {
    let bytes = fs::read(path).map_err(|e| EngineError::io(path, e))?;
    info!(path = %path.display(), bytes = bytes.len(), "loading submission");
    parse_submission(&bytes, signed_message)
}
