//! Engine configuration.
//!
//! Layered with the `config` crate, lowest precedence first:
//! 1. built-in defaults ([`EngineConfig::default`])
//! 2. a TOML file (explicit path, or `<config_dir>/trail/config.toml` if present)
//! 3. `TRAIL_*` environment variables, nested keys split on `__`
//!    (e.g. `TRAIL_SCORING__MODE=authenticity`)
//!
//! Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;
use trail_core::ScoringConfig;

use crate::error::EngineError;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TRAIL";

/// File name of the proof output inside `output_dir`.
pub const RESULTS_FILE: &str = "results.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Data pool the proof is issued for.
    pub dlp_id: i64,
    /// Signature over the submission's challenge; also the envelope key material.
    pub signed_message: Option<String>,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub scoring: ScoringConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dlp_id: 0,
            signed_message: None,
            input_dir: PathBuf::from("/input"),
            output_dir: PathBuf::from("/output"),
            scoring: ScoringConfig::default(),
        }
    }
}

impl EngineConfig {
    /// `<config_dir>/trail/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trail").join("config.toml"))
    }

    /// Load from `path` (required when given) or the default location
    /// (optional), then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        Self::load_with_env(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    pub(crate) fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, EngineError> {
        let mut builder = Config::builder();
        match path {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(default) = Self::default_path() {
                    builder = builder.add_source(File::from(default).required(false));
                }
            }
        }

        let config: Self = builder.add_source(env).build()?.try_deserialize()?;
        config.scoring.validate()?;
        Ok(config)
    }

    /// Where the finished proof is written.
    pub fn results_path(&self) -> PathBuf {
        self.output_dir.join(RESULTS_FILE)
    }
}
