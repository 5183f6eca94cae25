//! Content integrity of the event log.
//!
//! # Canonical form
//!
//! The digest is the lowercase hex SHA-256 of the compact JSON serialization of
//! `data.browsingDataArray` exactly as received: no whitespace, object keys in
//! their original order, non-ASCII text emitted literally. A missing array is
//! digested as `[]`. Comparison with the submitted `data_hash` is exact.

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;
use trail_core::types::RawSubmission;

/// Lowercase hex SHA-256 of the compact JSON of `value`.
pub fn digest_json(value: &Value) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(value)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Digest of the submission's raw `browsingDataArray`.
pub fn compute_data_hash(submission: &RawSubmission) -> Result<String, serde_json::Error> {
    match submission.data.get("browsingDataArray") {
        Some(array) => digest_json(array),
        None => digest_json(&Value::Array(Vec::new())),
    }
}

/// `true` when the recomputed digest equals `data_hash`. A missing hash fails.
pub fn verify_integrity(submission: &RawSubmission) -> bool {
    let Some(expected) = submission.data_hash.as_deref() else {
        debug!("integrity: no data_hash supplied");
        return false;
    };
    match compute_data_hash(submission) {
        Ok(computed) => {
            let matched = computed == expected;
            debug!(matched, "integrity: digest compared");
            matched
        }
        Err(e) => {
            debug!(error = %e, "integrity: canonical serialization failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(data: Value, data_hash: Option<&str>) -> RawSubmission {
        RawSubmission {
            data,
            data_hash: data_hash.map(str::to_string),
            ..RawSubmission::default()
        }
    }

    #[test]
    fn empty_array_digest() {
        // sha256("[]")
        assert_eq!(
            digest_json(&json!([])).unwrap(),
            "4f53cda18c2baa0c0354bb5f9a3ecbe5ed12ab4d8e11ba873c2f11161202b945"
        );
    }

    #[test]
    fn missing_array_digests_as_empty() {
        let sub = submission(json!({}), None);
        assert_eq!(compute_data_hash(&sub).unwrap(), digest_json(&json!([])).unwrap());
    }

    #[test]
    fn serialization_is_compact_and_ordered() {
        let raw = r#"[{"timeSpent": 5000, "url": "https://a.com/é"}]"#;
        let value: Value = serde_json::from_str(raw).unwrap();
        let bytes = serde_json::to_vec(&value).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"[{"timeSpent":5000,"url":"https://a.com/é"}]"#
        );
    }

    #[test]
    fn matching_hash_passes() {
        let data = json!({"browsingDataArray": [{"url": "https://a.com", "timeSpent": 1}]});
        let hash = digest_json(&data["browsingDataArray"]).unwrap();
        assert!(verify_integrity(&submission(data, Some(&hash))));
    }

    #[test]
    fn tampered_event_fails() {
        let data = json!({"browsingDataArray": [{"url": "https://a.com", "timeSpent": 1}]});
        let hash = digest_json(&data["browsingDataArray"]).unwrap();
        let tampered = json!({"browsingDataArray": [{"url": "https://a.com", "timeSpent": 2}]});
        assert!(!verify_integrity(&submission(tampered, Some(&hash))));
    }

    #[test]
    fn reordered_keys_fail() {
        let data: Value =
            serde_json::from_str(r#"{"browsingDataArray":[{"url":"https://a.com","timeSpent":1}]}"#)
                .unwrap();
        let reordered: Value =
            serde_json::from_str(r#"{"browsingDataArray":[{"timeSpent":1,"url":"https://a.com"}]}"#)
                .unwrap();
        let hash = digest_json(&data["browsingDataArray"]).unwrap();
        assert!(!verify_integrity(&submission(reordered, Some(&hash))));
    }

    #[test]
    fn uppercase_hash_fails() {
        let data = json!({"browsingDataArray": []});
        let hash = digest_json(&json!([])).unwrap().to_uppercase();
        assert!(!verify_integrity(&submission(data, Some(&hash))));
    }

    #[test]
    fn missing_hash_fails() {
        assert!(!verify_integrity(&submission(json!({"browsingDataArray": []}), None)));
    }

    #[test]
    fn evaluation_metrics_not_covered() {
        let data = json!({
            "browsingDataArray": [{"url": "https://a.com", "timeSpent": 1}],
            "evaluationMetrics": {"points": 1}
        });
        let hash = digest_json(&data["browsingDataArray"]).unwrap();
        let mut changed = data.clone();
        changed["evaluationMetrics"]["points"] = json!(99);
        assert!(verify_integrity(&submission(changed, Some(&hash))));
    }
}
