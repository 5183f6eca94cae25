//! Data model for submissions, metrics and proof responses.
//!
//! Submissions arrive as untrusted JSON. [`RawSubmission::from_value`] never
//! fails: fields that are missing or of the wrong type become `None` and are
//! scored conservatively downstream. The raw `browsingDataArray` is kept
//! verbatim so the integrity digest can be computed over exactly what was
//! received.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{LABEL_HIGH, LABEL_LOW, LABEL_MODERATE};
use crate::url::is_valid_url;

// ---------------------------------------------------------------------------
// BrowsingEvent
// ---------------------------------------------------------------------------

/// One page visit. Other fields on the wire are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowsingEvent {
    /// `None` when absent or not a string.
    pub url: Option<String>,
    /// Milliseconds; `None` when absent or not numeric.
    pub time_spent: Option<i64>,
}

impl BrowsingEvent {
    pub fn new(url: impl Into<String>, time_spent_ms: i64) -> Self {
        Self {
            url: Some(url.into()),
            time_spent: Some(time_spent_ms),
        }
    }

    /// Lenient conversion from one raw array entry.
    ///
    /// Fractional durations are floored; out-of-range values saturate.
    pub fn from_value(value: &Value) -> Self {
        let url = value.get("url").and_then(Value::as_str).map(str::to_string);
        let time_spent = value.get("timeSpent").and_then(number_to_ms);
        Self { url, time_spent }
    }

    /// Duration in milliseconds, defaulting to zero when missing.
    pub fn duration_ms(&self) -> i64 {
        self.time_spent.unwrap_or(0)
    }

    /// The URL text, or `""` when missing.
    pub fn url_str(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    /// Both required fields are present and the URL is well-formed.
    pub fn is_complete(&self) -> bool {
        self.time_spent.is_some() && self.url.as_deref().is_some_and(is_valid_url)
    }
}

fn number_to_ms(value: &Value) -> Option<i64> {
    if let Some(v) = value.as_i64() {
        return Some(v);
    }
    if value.as_u64().is_some() {
        return Some(i64::MAX);
    }
    let f = value.as_f64()?;
    // `as` saturates at the i64 bounds.
    f.is_finite().then(|| f.floor() as i64)
}

/// Integer-valued JSON number (`12` or `12.0`).
fn integral(value: &Value) -> Option<i64> {
    if let Some(v) = value.as_i64() {
        return Some(v);
    }
    let f = value.as_f64()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Aggregate metrics over a browsing session.
///
/// The same shape is used for what the submitter claims and for what the
/// engine recomputes; see [`ClaimedMetrics`] and [`RecalculatedMetrics`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub url_count: i64,
    /// Per-event whole seconds, in event order.
    #[serde(rename = "timeSpent")]
    pub time_spent: Vec<i64>,
    pub points: i64,
}

pub type ClaimedMetrics = EvaluationMetrics;
pub type RecalculatedMetrics = EvaluationMetrics;

impl EvaluationMetrics {
    /// Parse claimed metrics. Missing fields default to zero/empty; a field of
    /// the wrong type makes the whole claim unusable (`None`).
    pub fn from_claim(value: Option<&Value>) -> Option<Self> {
        let obj = match value {
            None => return Some(Self::default()),
            Some(v) => v.as_object()?,
        };

        let url_count = match obj.get("url_count") {
            None => 0,
            Some(v) => integral(v)?,
        };
        let points = match obj.get("points") {
            None => 0,
            Some(v) => integral(v)?,
        };
        let time_spent = match obj.get("timeSpent") {
            None => Vec::new(),
            Some(v) => v.as_array()?.iter().map(integral).collect::<Option<Vec<_>>>()?,
        };

        Some(Self { url_count, time_spent, points })
    }
}

// ---------------------------------------------------------------------------
// RawSubmission
// ---------------------------------------------------------------------------

/// A decrypted, JSON-decoded contribution. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSubmission {
    pub author: Option<String>,
    pub signature: Option<String>,
    pub random_string: Option<String>,
    /// The `data` object as received.
    pub data: Value,
    pub data_hash: Option<String>,
}

impl RawSubmission {
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            author: text("author"),
            signature: text("signature"),
            random_string: text("random_string"),
            data: value.get("data").cloned().unwrap_or(Value::Null),
            data_hash: text("data_hash"),
        }
    }

    /// `data.browsingDataArray` verbatim; empty when missing or not an array.
    pub fn raw_events(&self) -> &[Value] {
        self.data
            .get("browsingDataArray")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Typed view of the event log, in submission order.
    pub fn events(&self) -> Vec<BrowsingEvent> {
        self.raw_events().iter().map(BrowsingEvent::from_value).collect()
    }

    /// `data.evaluationMetrics`, or `None` when malformed.
    pub fn claimed_metrics(&self) -> Option<ClaimedMetrics> {
        EvaluationMetrics::from_claim(self.data.get("evaluationMetrics"))
    }
}

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// Qualitative bucket for the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    High,
    Moderate,
    Low,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => LABEL_HIGH,
            Self::Moderate => LABEL_MODERATE,
            Self::Low => LABEL_LOW,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Label {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ScoreBundle / ProofResponse
// ---------------------------------------------------------------------------

/// Independently computed signals for one submission, before assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBundle {
    /// Schema correctness of the event log.
    pub correctness: bool,
    /// Claimed metrics equal the recomputed ones.
    pub honesty: bool,
    pub quality: f64,
    /// Heuristic authenticity in `[0, 1]`.
    pub authenticity: f64,
    /// 1.0 or 0.0.
    pub ownership: f64,
    pub integrity: bool,
    /// Combined score before the sigmoid.
    pub raw_score: f64,
    /// Sigmoid output, unrounded. The label is taken from this value.
    pub final_score: f64,
    pub label: Label,
    /// Recomputed points, for auditability.
    pub points: i64,
}

/// The proof of contribution. Only `score` and `metadata` are public.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofResponse {
    pub dlp_id: i64,
    pub valid: bool,
    pub score: f64,
    pub authenticity: f64,
    pub ownership: f64,
    pub quality: f64,
    pub uniqueness: f64,
    pub correctness: bool,
    pub integrity: bool,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl ProofResponse {
    /// An all-negative response for the given pool.
    pub fn new(dlp_id: i64) -> Self {
        Self {
            dlp_id,
            valid: false,
            score: 0.0,
            authenticity: 0.0,
            ownership: 0.0,
            quality: 0.0,
            uniqueness: 0.0,
            correctness: false,
            integrity: false,
            attributes: Map::new(),
            metadata: Map::new(),
        }
    }
}
