//! Directory-in, results-out runs of the proof engine.

use std::fs;
use std::path::Path;

use trail_core::{ProofResponse, ScoringConfig, ScoringMode};
use trail_engine::{EngineConfig, EngineError, ProofEngine};
use trail_tests::helpers::*;
use trail_verify::EncryptedEnvelope;

fn config(input: &Path, output: &Path, mode: ScoringMode, signed: Option<String>) -> EngineConfig {
    EngineConfig {
        dlp_id: 26,
        signed_message: signed,
        input_dir: input.to_path_buf(),
        output_dir: output.to_path_buf(),
        scoring: ScoringConfig::with_mode(mode),
    }
}

fn read_results(path: &Path) -> ProofResponse {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn plain_submission_round_trip() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let body = SubmissionBuilder::new(repeated("https://example.com/page", 5_000, 10)).to_value();
    fs::write(input.path().join("submission.json"), body.to_string()).unwrap();

    let engine = ProofEngine::new(config(
        input.path(),
        output.path(),
        ScoringMode::Correctness,
        None,
    ));
    let response = engine.generate().unwrap();
    assert!(response.valid);
    assert_eq!(response.dlp_id, 26);
    assert_eq!(response.metadata["dlp_id"], serde_json::json!(26));

    let path = engine.write_results(&response).unwrap();
    assert_eq!(path, output.path().join("results.json"));
    assert_eq!(read_results(&path), response);
}

#[test]
fn encrypted_submission_with_configured_signature() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    // The configured signed message both keys the envelope and proves
    // ownership; the submission itself carries no signature.
    let signed = sign_challenge(&test_signing_key(), TEST_CHALLENGE);
    let body = SubmissionBuilder::new(repeated("https://example.com/page", 5_000, 10))
        .signature(None)
        .to_value();
    let envelope =
        EncryptedEnvelope::seal(body.to_string().as_bytes(), &signed, [9u8; 12]).unwrap();
    fs::write(
        input.path().join("upload.zip"),
        serde_json::to_vec(&envelope).unwrap(),
    )
    .unwrap();

    let engine = ProofEngine::new(config(
        input.path(),
        output.path(),
        ScoringMode::Authenticity,
        Some(signed),
    ));
    let response = engine.generate().unwrap();
    assert_eq!(response.ownership, 1.0);
    assert!(response.valid);
    assert_eq!(response.authenticity, 0.95);
}

#[test]
fn encrypted_submission_with_wrong_key_is_fatal() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let envelope = EncryptedEnvelope::seal(b"{}", "0xaa", [9u8; 12]).unwrap();
    fs::write(input.path().join("upload.json"), serde_json::to_vec(&envelope).unwrap()).unwrap();

    let engine = ProofEngine::new(config(
        input.path(),
        output.path(),
        ScoringMode::Correctness,
        Some("0xbb".into()),
    ));
    assert!(matches!(engine.generate(), Err(EngineError::Envelope(_))));
}

#[test]
fn empty_input_dir_is_fatal() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("readme.txt"), "nothing here").unwrap();

    let engine = ProofEngine::new(config(
        input.path(),
        output.path(),
        ScoringMode::Correctness,
        None,
    ));
    assert!(matches!(engine.generate(), Err(EngineError::NoInput(_))));
    assert!(!output.path().join("results.json").exists());
}

#[test]
fn first_file_by_name_is_scored() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let good = SubmissionBuilder::new(repeated("https://example.com/page", 5_000, 10)).to_value();
    let bad = SubmissionBuilder::new(serde_json::json!([])).to_value();
    fs::write(input.path().join("a.json"), good.to_string()).unwrap();
    fs::write(input.path().join("b.json"), bad.to_string()).unwrap();

    let engine = ProofEngine::new(config(
        input.path(),
        output.path(),
        ScoringMode::Correctness,
        None,
    ));
    assert!(engine.generate().unwrap().valid);
}

#[test]
fn config_file_drives_engine() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let body = SubmissionBuilder::new(repeated("https://example.com/page", 5_000, 10)).to_value();
    fs::write(input.path().join("in.json"), body.to_string()).unwrap();

    let cfg_path = input.path().join("trail.toml");
    fs::write(
        &cfg_path,
        format!(
            "dlp_id = 3\ninput_dir = {:?}\noutput_dir = {:?}\n\n[scoring]\nmode = \"authenticity\"\n",
            input.path().display().to_string(),
            output.path().display().to_string()
        ),
    )
    .unwrap();

    let loaded = EngineConfig::load(Some(&cfg_path)).unwrap();
    assert_eq!(loaded.scoring.mode, ScoringMode::Authenticity);

    let engine = ProofEngine::new(loaded);
    let response = engine.generate().unwrap();
    assert_eq!(response.dlp_id, 3);
    assert!(response.metadata.contains_key("authenticity"));
}
