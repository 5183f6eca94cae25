//! Schema correctness of the event log.

use trail_core::types::BrowsingEvent;

/// `true` when at least half of the entries carry a numeric `timeSpent` and a
/// well-formed URL. An empty log is never correct.
pub fn evaluate_correctness(events: &[BrowsingEvent]) -> bool {
    if events.is_empty() {
        return false;
    }
    let complete = events.iter().filter(|e| e.is_complete()).count();
    // complete >= n / 2 in real division, without floats.
    complete * 2 >= events.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_incorrect() {
        assert!(!evaluate_correctness(&[]));
    }

    #[test]
    fn all_complete() {
        let events = vec![BrowsingEvent::new("https://a.com", 1); 3];
        assert!(evaluate_correctness(&events));
    }

    #[test]
    fn exactly_half_is_correct() {
        let events = vec![
            BrowsingEvent::new("https://a.com", 1),
            BrowsingEvent::new("a.com", 1),
        ];
        assert!(evaluate_correctness(&events));
    }

    #[test]
    fn below_half_is_incorrect() {
        let events = vec![
            BrowsingEvent::new("https://a.com", 1),
            BrowsingEvent::new("a.com", 1),
            BrowsingEvent { url: Some("https://b.com".into()), time_spent: None },
        ];
        assert!(!evaluate_correctness(&events));
    }
}
