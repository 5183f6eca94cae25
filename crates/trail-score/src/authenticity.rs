//! Session authenticity from behavioral penalties and bonuses.
//!
//! The score starts at [`MAX_AUTHENTICITY_SCORE`] and is kept within
//! `[0, 100]` after every adjustment. Adjustments are applied in a fixed order:
//!
//! 1. short visits (`-20 * ratio`) and long visits (`-15 * ratio`)
//! 2. domain continuity (`-10` when every transition changes domain, otherwise
//!    `+5 * continuity_ratio`) and sub-path continuity (`+5 * ratio`)
//! 3. sliding windows: `-8` for each window of all-distinct domains and `-8`
//!    for each window of all-short visits
//! 4. mean out of range (`-10` per bound) and uniform timing (`-5`)
//! 5. identical per-domain segment totals (`-10`)
//!
//! The result is divided by 100.

use tracing::trace;
use trail_core::config::ScoringConfig;
use trail_core::constants::MAX_AUTHENTICITY_SCORE;
use trail_core::traits::SessionHeuristic;
use trail_core::types::BrowsingEvent;
use trail_core::url::{DomainPath, domain_path};

use crate::normalize::clamp01;
use crate::stats::DurationStats;

const SHORT_VISIT_PENALTY: f64 = 20.0;
const LONG_VISIT_PENALTY: f64 = 15.0;
const DOMAIN_HOPPING_PENALTY: f64 = 10.0;
const CONTINUITY_BONUS: f64 = 5.0;
const SUB_PATH_BONUS: f64 = 5.0;
const WINDOW_DISTINCT_DOMAINS_PENALTY: f64 = 8.0;
const WINDOW_ALL_SHORT_PENALTY: f64 = 8.0;
const EXTREME_MEAN_PENALTY: f64 = 10.0;
const UNIFORM_TIMING_PENALTY: f64 = 5.0;
const UNIFORM_SEGMENTS_PENALTY: f64 = 10.0;

/// [`SessionHeuristic`] wrapper around [`evaluate_authenticity`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticityHeuristic;

impl SessionHeuristic for AuthenticityHeuristic {
    fn name(&self) -> &'static str {
        "authenticity"
    }

    fn score(&self, events: &[BrowsingEvent], config: &ScoringConfig) -> f64 {
        evaluate_authenticity(events, config)
    }
}

/// Score on `[0, MAX_AUTHENTICITY_SCORE]` that saturates at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BoundedScore(f64);

impl BoundedScore {
    fn full() -> Self {
        Self(MAX_AUTHENTICITY_SCORE)
    }

    fn adjust(&mut self, delta: f64) {
        self.0 = (self.0 + delta).clamp(0.0, MAX_AUTHENTICITY_SCORE);
    }

    fn normalized(&self) -> f64 {
        clamp01(self.0 / MAX_AUTHENTICITY_SCORE)
    }
}

/// Per-event pass over the session.
#[derive(Debug, Default)]
struct SessionScan {
    durations: Vec<i64>,
    /// `None` for events whose URL is missing or invalid.
    locations: Vec<Option<DomainPath>>,
    short_visits: usize,
    long_visits: usize,
    /// Transitions between valid URLs that changed domain.
    no_continuity: usize,
    /// Transitions that kept both domain and first path segment.
    sub_path_continuity: usize,
}

impl SessionScan {
    fn new(events: &[BrowsingEvent], config: &ScoringConfig) -> Self {
        let mut scan = Self::default();
        let mut previous: Option<DomainPath> = None;

        for event in events {
            let duration = event.duration_ms();
            if duration < config.min_time_spent_ms {
                scan.short_visits += 1;
            }
            if duration > config.max_time_spent_ms {
                scan.long_visits += 1;
            }
            scan.durations.push(duration);

            let location = event.url.as_deref().and_then(domain_path);
            if let Some(current) = &location {
                match &previous {
                    // An empty domain never counts as a previous domain.
                    Some(prev) if !prev.domain.is_empty() && prev.domain != current.domain => {
                        scan.no_continuity += 1;
                    }
                    Some(prev)
                        if prev.domain == current.domain && prev.base_path == current.base_path =>
                    {
                        scan.sub_path_continuity += 1;
                    }
                    _ => {}
                }
                previous = Some(current.clone());
            }
            scan.locations.push(location);
        }

        scan
    }

    fn domain(&self, index: usize) -> Option<&str> {
        self.locations[index].as_ref().map(|l| l.domain.as_str())
    }
}

/// Authenticity score in `[0, 1]`; `0.0` for an empty session.
pub fn evaluate_authenticity(events: &[BrowsingEvent], config: &ScoringConfig) -> f64 {
    if events.is_empty() {
        return 0.0;
    }
    let scan = SessionScan::new(events, config);
    let n = events.len();
    let mut score = BoundedScore::full();

    // 1. Visit durations.
    score.adjust(-SHORT_VISIT_PENALTY * (scan.short_visits as f64 / n as f64));
    score.adjust(-LONG_VISIT_PENALTY * (scan.long_visits as f64 / n as f64));

    // 2. Continuity.
    if n > 1 {
        let transitions = (n - 1) as f64;
        let continuity_ratio = 1.0 - scan.no_continuity as f64 / transitions;
        if continuity_ratio == 0.0 {
            score.adjust(-DOMAIN_HOPPING_PENALTY);
        } else {
            score.adjust(CONTINUITY_BONUS * continuity_ratio);
        }
        score.adjust(SUB_PATH_BONUS * (scan.sub_path_continuity as f64 / transitions));
    }

    // 3. Sliding windows.
    let (hopping_windows, short_windows) = window_anomalies(&scan, config);
    for _ in 0..hopping_windows {
        score.adjust(-WINDOW_DISTINCT_DOMAINS_PENALTY);
    }
    for _ in 0..short_windows {
        score.adjust(-WINDOW_ALL_SHORT_PENALTY);
    }

    // 4. Timing statistics.
    let stats = DurationStats::new(&scan.durations);
    if stats.mean_below(config.min_time_spent_ms) {
        score.adjust(-EXTREME_MEAN_PENALTY);
    }
    if stats.mean_above(config.max_time_spent_ms) {
        score.adjust(-EXTREME_MEAN_PENALTY);
    }
    if stats.is_uniform() {
        score.adjust(-UNIFORM_TIMING_PENALTY);
    }

    // 5. Domain segments.
    if has_uniform_segments(&scan) {
        score.adjust(-UNIFORM_SEGMENTS_PENALTY);
    }

    trace!(
        score = score.0,
        short = scan.short_visits,
        long = scan.long_visits,
        no_continuity = scan.no_continuity,
        sub_path_continuity = scan.sub_path_continuity,
        hopping_windows,
        short_windows,
        "authenticity: scored"
    );

    score.normalized()
}

/// Count windows whose domains are all valid and pairwise distinct, and
/// windows whose visits are all short.
fn window_anomalies(scan: &SessionScan, config: &ScoringConfig) -> (usize, usize) {
    let size = config.window_size;
    let n = scan.durations.len();
    if size == 0 || n < size {
        return (0, 0);
    }

    let mut hopping = 0;
    let mut short = 0;
    for start in 0..=(n - size) {
        let mut domains: Vec<&str> = (start..start + size).filter_map(|i| scan.domain(i)).collect();
        domains.sort_unstable();
        domains.dedup();
        if domains.len() == size {
            hopping += 1;
        }
        if scan.durations[start..start + size]
            .iter()
            .all(|d| *d < config.min_time_spent_ms)
        {
            short += 1;
        }
    }
    (hopping, short)
}

/// `true` when the session splits into at least two maximal same-domain runs
/// and every run has the same total duration. Events without a valid URL form
/// runs of their own.
fn has_uniform_segments(scan: &SessionScan) -> bool {
    let mut totals: Vec<i128> = Vec::new();
    let mut current: Option<Option<&str>> = None;

    for (i, duration) in scan.durations.iter().enumerate() {
        let domain = scan.domain(i);
        let duration = i128::from(*duration);
        match totals.last_mut() {
            Some(total) if current == Some(domain) => *total += duration,
            _ => {
                totals.push(duration);
                current = Some(domain);
            }
        }
    }

    totals.len() >= 2 && totals.windows(2).all(|w| w[0] == w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cfg() -> ScoringConfig {
        ScoringConfig::default()
    }

    fn ev(url: &str, ms: i64) -> BrowsingEvent {
        BrowsingEvent::new(url, ms)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_session_scores_zero() {
        assert_eq!(evaluate_authenticity(&[], &cfg()), 0.0);
    }

    #[test]
    fn uniform_same_page_session() {
        // Continuity bonuses saturate at 100, uniform timing costs 5.
        let events = vec![ev("https://example.com/page", 5_000); 10];
        assert!(approx(evaluate_authenticity(&events, &cfg()), 0.95));
    }

    #[test]
    fn domain_hopping_short_session_bottoms_out() {
        let events: Vec<_> = (0..5).map(|i| ev(&format!("https://site{i}.com/"), 1_000)).collect();
        assert_eq!(evaluate_authenticity(&events, &cfg()), 0.0);
    }

    #[test]
    fn natural_session_keeps_full_score() {
        let events = vec![
            ev("https://news.site/world/a", 40_000),
            ev("https://news.site/world/b", 65_000),
            ev("https://news.site/sport/c", 22_000),
            ev("https://mail.app/inbox", 90_000),
            ev("https://mail.app/inbox/1", 15_500),
        ];
        assert_eq!(evaluate_authenticity(&events, &cfg()), 1.0);
    }

    #[test]
    fn single_event_only_uniform_penalty() {
        let events = vec![ev("https://example.com/", 10_000)];
        assert!(approx(evaluate_authenticity(&events, &cfg()), 0.95));
    }

    #[test]
    fn scan_counts_continuity() {
        let events = vec![
            ev("https://a.com/x/1", 5_000),
            ev("https://a.com/x/2", 5_000),
            ev("https://a.com/y", 5_000),
            ev("not-a-url", 5_000),
            ev("https://b.com/x", 5_000),
            ev("https://b.com/x", 5_000),
        ];
        let scan = SessionScan::new(&events, &cfg());
        assert_eq!(scan.no_continuity, 1);
        assert_eq!(scan.sub_path_continuity, 2);
        assert_eq!(scan.locations[3], None);
        assert_eq!(scan.durations.len(), 6);
    }

    #[test]
    fn invalid_urls_still_count_in_durations() {
        let events = vec![ev("garbage", 1_000), ev("garbage", 1_000)];
        let scan = SessionScan::new(&events, &cfg());
        assert_eq!(scan.short_visits, 2);
        assert_eq!(scan.no_continuity, 0);
    }

    #[test]
    fn continuity_ratio_zero_penalized() {
        // 3 events, 2 transitions, both change domain. Windows: one window of
        // 3 distinct domains (-8). Durations varied, mean in range.
        let events = vec![
            ev("https://a.com/", 10_000),
            ev("https://b.com/", 30_000),
            ev("https://c.com/", 70_000),
        ];
        // 100 - 10 - 8 = 82
        assert!(approx(evaluate_authenticity(&events, &cfg()), 0.82));
    }

    #[test]
    fn partial_continuity_bonus() {
        // transitions: a→a (same sub-path), a→b (change): ratio 0.5
        let events = vec![
            ev("https://a.com/p/1", 10_000),
            ev("https://a.com/p/2", 30_000),
            ev("https://b.com/q", 70_000),
        ];
        let scan = SessionScan::new(&events, &cfg());
        assert_eq!(scan.no_continuity, 1);
        assert_eq!(scan.sub_path_continuity, 1);
        assert_eq!(window_anomalies(&scan, &cfg()), (0, 0));
        assert_eq!(evaluate_authenticity(&events, &cfg()), 1.0);
    }

    #[test]
    fn long_visit_and_continuity_bonuses_mid_range() {
        // long 1/4: -3.75; continuity 1/3: +5/3; sub-path 1/3: +5/3;
        // one all-distinct window: -8
        let events = vec![
            ev("https://a.com/x", 2_000_000),
            ev("https://a.com/x", 10_000),
            ev("https://b.com/y", 40_000),
            ev("https://c.com/z", 70_000),
        ];
        let expected = (100.0 - 3.75 + 5.0 / 3.0 + 5.0 / 3.0 - 8.0) / 100.0;
        assert!(approx(evaluate_authenticity(&events, &cfg()), expected));
        assert!(approx(expected, 0.915_833_333_333_333_4));
    }

    #[test]
    fn two_short_hops_stack_penalties() {
        // short -20, hopping -10, low mean -10, uniform -5, equal segments -10
        let events = vec![ev("https://a.com/x", 1_000), ev("https://b.com/y", 1_000)];
        assert!(approx(evaluate_authenticity(&events, &cfg()), 0.45));
    }

    #[test]
    fn mean_above_max_penalized() {
        // long 2/2: -15; continuity and sub-path: +10; mean above max: -10
        let events = vec![
            ev("https://example.com/page", 2_000_000),
            ev("https://example.com/page", 2_500_000),
        ];
        let scan = SessionScan::new(&events, &cfg());
        assert!(!DurationStats::new(&scan.durations).is_uniform());
        assert!(!has_uniform_segments(&scan));
        assert!(approx(evaluate_authenticity(&events, &cfg()), 0.85));
    }

    #[test]
    fn equal_segments_penalized_alone() {
        // a.com 10s + 20s, b.com 30s: equal segment totals, nothing else fires
        let events = vec![
            ev("https://a.com/x", 10_000),
            ev("https://a.com/y", 20_000),
            ev("https://b.com/z", 30_000),
        ];
        let scan = SessionScan::new(&events, &cfg());
        assert_eq!(window_anomalies(&scan, &cfg()), (0, 0));
        assert!(has_uniform_segments(&scan));
        assert!(approx(evaluate_authenticity(&events, &cfg()), 0.9));
    }

    #[test]
    fn windows_detect_both_anomalies() {
        let events: Vec<_> = ["https://a.com/", "https://b.com/", "https://c.com/", "https://a.com/"]
            .iter()
            .map(|u| ev(u, 500))
            .collect();
        let scan = SessionScan::new(&events, &cfg());
        assert_eq!(window_anomalies(&scan, &cfg()), (2, 2));
    }

    #[test]
    fn window_with_invalid_url_is_not_hopping() {
        let events = vec![
            ev("https://a.com/", 10_000),
            ev("bad", 20_000),
            ev("https://c.com/", 30_000),
        ];
        let scan = SessionScan::new(&events, &cfg());
        assert_eq!(window_anomalies(&scan, &cfg()), (0, 0));
    }

    #[test]
    fn short_session_has_no_windows() {
        let events = vec![ev("https://a.com/", 500), ev("https://b.com/", 500)];
        let scan = SessionScan::new(&events, &cfg());
        assert_eq!(window_anomalies(&scan, &cfg()), (0, 0));
    }

    #[test]
    fn uniform_segments_detected() {
        let events = vec![
            ev("https://a.com/", 10_000),
            ev("https://a.com/", 20_000),
            ev("https://b.com/", 30_000),
            ev("https://a.com/", 5_000),
            ev("https://a.com/", 25_000),
        ];
        let scan = SessionScan::new(&events, &cfg());
        assert!(has_uniform_segments(&scan));
    }

    #[test]
    fn single_segment_is_not_uniform() {
        let events = vec![ev("https://a.com/", 10_000); 4];
        let scan = SessionScan::new(&events, &cfg());
        assert!(!has_uniform_segments(&scan));
    }

    #[test]
    fn unequal_segments_not_uniform() {
        let events = vec![ev("https://a.com/", 10_000), ev("https://b.com/", 20_000)];
        let scan = SessionScan::new(&events, &cfg());
        assert!(!has_uniform_segments(&scan));
    }

    #[test]
    fn bounded_score_saturates() {
        let mut s = BoundedScore::full();
        s.adjust(25.0);
        assert_eq!(s.0, 100.0);
        s.adjust(-250.0);
        assert_eq!(s.0, 0.0);
        s.adjust(5.0);
        assert_eq!(s.0, 5.0);
        assert_eq!(s.normalized(), 0.05);
    }

    #[test]
    fn heuristic_trait_delegates() {
        let events = vec![ev("https://example.com/page", 5_000); 3];
        assert_eq!(AuthenticityHeuristic.name(), "authenticity");
        assert_eq!(
            AuthenticityHeuristic.score(&events, &cfg()),
            evaluate_authenticity(&events, &cfg())
        );
    }

    fn arb_event() -> impl Strategy<Value = BrowsingEvent> {
        (
            prop_oneof![
                Just("https://a.com/x".to_string()),
                Just("https://a.com/y".to_string()),
                Just("https://b.org/".to_string()),
                Just("http://c.net/z/1".to_string()),
                Just("nonsense".to_string()),
            ],
            -1_000i64..4_000_000,
        )
            .prop_map(|(url, ms)| BrowsingEvent::new(url, ms))
    }

    proptest! {
        #[test]
        fn authenticity_in_unit_range(events in prop::collection::vec(arb_event(), 0..60)) {
            let a = evaluate_authenticity(&events, &cfg());
            prop_assert!((0.0..=1.0).contains(&a), "authenticity out of range: {}", a);
        }

        #[test]
        fn authenticity_deterministic(events in prop::collection::vec(arb_event(), 0..30)) {
            prop_assert_eq!(
                evaluate_authenticity(&events, &cfg()).to_bits(),
                evaluate_authenticity(&events, &cfg()).to_bits()
            );
        }
    }
}
