//! Proof engine: one submission in, one [`ProofResponse`] out.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};
use trail_core::{ProofResponse, RawSubmission};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::input::{find_input_file, load_submission};
use crate::verdict::{assemble, evaluate};

#[derive(Debug, Clone)]
pub struct ProofEngine {
    config: EngineConfig,
}

impl ProofEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The configured signed message, or the submission's own signature.
    pub fn signature_for<'a>(&'a self, submission: &'a RawSubmission) -> Option<&'a str> {
        self.config
            .signed_message
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(submission.signature.as_deref())
    }

    /// Score an already-loaded submission. Never fails.
    pub fn score_submission(&self, submission: &RawSubmission) -> ProofResponse {
        let scoring = &self.config.scoring;
        let bundle = evaluate(submission, self.signature_for(submission), scoring);
        let response = assemble(&bundle, self.config.dlp_id, scoring);

        info!(
            dlp_id = response.dlp_id,
            mode = ?scoring.mode,
            valid = response.valid,
            score = response.score,
            quality = response.quality,
            authenticity = response.authenticity,
            ownership = response.ownership,
            integrity = response.integrity,
            correctness = response.correctness,
            honesty = bundle.honesty,
            label = %bundle.label,
            "proof generated"
        );
        if !response.valid {
            warn!(dlp_id = response.dlp_id, "submission did not qualify");
        }
        response
    }

    /// Find, load and score the submission in `input_dir`.
    pub fn generate(&self) -> Result<ProofResponse, EngineError> {
        info!(input_dir = %self.config.input_dir.display(), "starting proof generation");
        let path = find_input_file(&self.config.input_dir)?;
        let submission = load_submission(&path, self.config.signed_message.as_deref())?;
        Ok(self.score_submission(&submission))
    }

    /// Write `response` as pretty JSON to `<output_dir>/results.json`.
    pub fn write_results(&self, response: &ProofResponse) -> Result<PathBuf, EngineError> {
        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).map_err(|e| EngineError::io(dir, e))?;

        let path = self.config.results_path();
        let body = serde_json::to_vec_pretty(response)
            .map_err(|e| EngineError::io(&path, std::io::Error::other(e)))?;
        fs::write(&path, body).map_err(|e| EngineError::io(&path, e))?;
        info!(path = %path.display(), "results written");
        Ok(path)
    }
}
