//! Shared builders for scenario and end-to-end tests.

use k256::ecdsa::SigningKey;
use serde_json::{Value, json};
use trail_core::{BrowsingEvent, RawSubmission, ScoringConfig, ScoringMode};
use trail_engine::{EngineConfig, ProofEngine};
use trail_score::recalculate_metrics;
use trail_verify::integrity::digest_json;
use trail_verify::ownership::personal_message_hash;

/// Well-known throwaway secp256k1 key.
pub const TEST_KEY_HEX: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

/// Address of [`TEST_KEY_HEX`].
pub const TEST_ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";

pub const TEST_CHALLENGE: &str = "abc123";

pub fn test_signing_key() -> SigningKey {
    let bytes = hex::decode(TEST_KEY_HEX).unwrap();
    SigningKey::from_slice(&bytes).unwrap()
}

/// `0x`-prefixed personal-message signature with `v` in {27, 28}.
pub fn sign_challenge(key: &SigningKey, challenge: &str) -> String {
    let (sig, recid) = key
        .sign_prehash_recoverable(&personal_message_hash(challenge))
        .unwrap();
    let mut bytes = sig.to_bytes().to_vec();
    bytes.push(27 + recid.to_byte());
    format!("0x{}", hex::encode(bytes))
}

/// `browsingDataArray` from `(url, timeSpent)` pairs.
pub fn events(pairs: &[(&str, i64)]) -> Value {
    Value::Array(
        pairs
            .iter()
            .map(|(url, ms)| json!({"url": url, "timeSpent": ms}))
            .collect(),
    )
}

/// `n` copies of the same event.
pub fn repeated(url: &str, ms: i64, n: usize) -> Value {
    events(&vec![(url, ms); n])
}

/// Metrics an honest client would claim for `browsing`.
pub fn honest_claim(browsing: &Value) -> Value {
    let typed: Vec<BrowsingEvent> = browsing
        .as_array()
        .map(|a| a.iter().map(BrowsingEvent::from_value).collect())
        .unwrap_or_default();
    serde_json::to_value(recalculate_metrics(&typed, &ScoringConfig::default())).unwrap()
}

/// Builds submission JSON. Defaults to an honest, correctly hashed and
/// correctly signed submission by the test key.
#[derive(Debug, Clone)]
pub struct SubmissionBuilder {
    author: Option<String>,
    signature: Option<String>,
    random_string: Option<String>,
    browsing: Value,
    claim: Option<Value>,
    data_hash: Option<String>,
}

impl SubmissionBuilder {
    pub fn new(browsing: Value) -> Self {
        Self {
            author: Some(TEST_ADDRESS.to_string()),
            signature: Some(sign_challenge(&test_signing_key(), TEST_CHALLENGE)),
            random_string: Some(TEST_CHALLENGE.to_string()),
            claim: Some(honest_claim(&browsing)),
            data_hash: Some(digest_json(&browsing).unwrap()),
            browsing,
        }
    }

    pub fn author(mut self, author: Option<&str>) -> Self {
        self.author = author.map(str::to_string);
        self
    }

    pub fn signature(mut self, signature: Option<&str>) -> Self {
        self.signature = signature.map(str::to_string);
        self
    }

    pub fn claim(mut self, claim: Option<Value>) -> Self {
        self.claim = claim;
        self
    }

    pub fn data_hash(mut self, hash: Option<&str>) -> Self {
        self.data_hash = hash.map(str::to_string);
        self
    }

    /// Replace the event log after the hash and claim were taken.
    pub fn tamper_events(mut self, browsing: Value) -> Self {
        self.browsing = browsing;
        self
    }

    pub fn to_value(&self) -> Value {
        let mut data = serde_json::Map::new();
        data.insert("browsingDataArray".into(), self.browsing.clone());
        if let Some(claim) = &self.claim {
            data.insert("evaluationMetrics".into(), claim.clone());
        }

        let mut root = serde_json::Map::new();
        let mut put = |key: &str, value: &Option<String>| {
            if let Some(v) = value {
                root.insert(key.into(), Value::from(v.as_str()));
            }
        };
        put("author", &self.author);
        put("signature", &self.signature);
        put("random_string", &self.random_string);
        put("data_hash", &self.data_hash);
        root.insert("data".into(), Value::Object(data));
        Value::Object(root)
    }

    pub fn build(&self) -> RawSubmission {
        RawSubmission::from_value(&self.to_value())
    }
}

/// Engine with default thresholds in `mode` and no configured signature, so
/// the submission's own `signature` is checked.
pub fn engine(mode: ScoringMode) -> ProofEngine {
    ProofEngine::new(EngineConfig {
        dlp_id: 1,
        scoring: ScoringConfig::with_mode(mode),
        ..EngineConfig::default()
    })
}

/// Approximate float equality for scores.
pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
