//! Fatal engine errors. Everything else degrades to a score.

use std::path::PathBuf;

use thiserror::Error;
use trail_core::CoreError;
use trail_verify::EnvelopeError;

#[derive(Error, Debug)]
pub enum EngineError {
    /// No `.json` or `.zip` submission in the input directory.
    #[error("no submission file (.json or .zip) found in {0}")]
    NoInput(PathBuf),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The submission (or the opened envelope) is not JSON.
    #[error("malformed submission JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("encrypted submission: {0}")]
    Envelope(#[from] EnvelopeError),

    /// An envelope was found but no signed message is configured.
    #[error("encrypted submission requires a signed message")]
    MissingSignedMessage,

    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid scoring configuration: {0}")]
    Scoring(#[from] CoreError),
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
