//! Verdict assembly.
//!
//! [`evaluate`] runs every component over a submission and collects the raw
//! signals in a [`ScoreBundle`]. [`assemble`] applies the mode's validity rule
//! and shapes the public [`ProofResponse`].
//!
//! Validity:
//! - correctness mode: ownership, honesty, integrity and correctness all pass
//!   and the rounded score reaches `moderate_threshold`
//! - authenticity mode: ownership and honesty pass and the rounded score
//!   reaches `moderate_quality_threshold_pct / 100`

use serde_json::{Map, Value, json};
use tracing::debug;
use trail_core::{
    BrowsingEvent, ProofResponse, RawSubmission, ScoreBundle, ScoringConfig, ScoringMode,
    SessionHeuristic,
};
use trail_score::{
    AuthenticityHeuristic, QualityHeuristic, clamp01, combine, evaluate_correctness,
    honesty_score, label_for, recalculate_metrics, round2, sigmoid,
};
use trail_verify::{verify_integrity, verify_ownership};

/// Compute every signal for `submission`. `signature` is checked against the
/// submission's `author` over its `random_string`.
pub fn evaluate(
    submission: &RawSubmission,
    signature: Option<&str>,
    config: &ScoringConfig,
) -> ScoreBundle {
    let events = submission.events();

    let recalculated = recalculate_metrics(&events, config);
    let claimed = submission.claimed_metrics();
    let honesty = honesty_score(&recalculated, claimed.as_ref()) == 1.0;

    let ownership = verify_ownership(
        submission.author.as_deref(),
        signature,
        submission.random_string.as_deref(),
    )
    .score();
    let integrity = verify_integrity(submission);
    let correctness = evaluate_correctness(&events);

    let quality = run_heuristic(&QualityHeuristic, &events, config);
    let authenticity = run_heuristic(&AuthenticityHeuristic, &events, config);
    let raw_score = combine(quality, authenticity, config);
    let final_score = sigmoid(raw_score, config.sigmoid_k, config.sigmoid_x0);

    ScoreBundle {
        correctness,
        honesty,
        quality,
        authenticity,
        ownership,
        integrity,
        raw_score,
        final_score,
        label: label_for(final_score, config),
        points: recalculated.points,
    }
}

fn run_heuristic(
    heuristic: &dyn SessionHeuristic,
    events: &[BrowsingEvent],
    config: &ScoringConfig,
) -> f64 {
    let score = heuristic.score(events, config);
    debug!(heuristic = heuristic.name(), score, "heuristic scored");
    score
}

/// Validity under the active mode. Compares the score as displayed.
pub fn is_valid(bundle: &ScoreBundle, config: &ScoringConfig) -> bool {
    let score = round2(bundle.final_score);
    let owned = bundle.ownership == 1.0;
    let passes = score >= config.validity_threshold();
    match config.mode {
        ScoringMode::Correctness => {
            owned && bundle.honesty && bundle.integrity && bundle.correctness && passes
        }
        ScoringMode::Authenticity => owned && bundle.honesty && passes,
    }
}

/// Shape the public response.
///
/// In correctness mode `authenticity` reports the honesty check as 1.0/0.0;
/// in authenticity mode it reports the heuristic.
pub fn assemble(bundle: &ScoreBundle, dlp_id: i64, config: &ScoringConfig) -> ProofResponse {
    let valid = is_valid(bundle, config);
    let score = clamp01(round2(bundle.final_score));
    let quality = clamp01(round2(bundle.quality));
    let authenticity = match config.mode {
        ScoringMode::Correctness => {
            if bundle.honesty {
                1.0
            } else {
                0.0
            }
        }
        ScoringMode::Authenticity => clamp01(round2(bundle.authenticity)),
    };

    let mut attributes = Map::new();
    attributes.insert("label".into(), Value::from(bundle.label.as_str()));

    let mut metadata = Map::new();
    metadata.insert("dlp_id".into(), json!(dlp_id));
    metadata.insert("valid".into(), json!(valid));
    metadata.insert("quality".into(), json!(quality));
    metadata.insert("points".into(), json!(bundle.points));
    if config.mode == ScoringMode::Authenticity {
        metadata.insert("authenticity".into(), json!(authenticity));
    }

    ProofResponse {
        valid,
        score,
        authenticity,
        ownership: bundle.ownership,
        quality,
        correctness: bundle.correctness,
        integrity: bundle.integrity,
        attributes,
        metadata,
        ..ProofResponse::new(dlp_id)
    }
}
