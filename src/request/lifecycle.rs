use tracing::{debug, info};

use crate::model::{MoodRequest, Recommendation};

/// What the results area should show. Exactly one phase is active at a
/// time; transitions happen only through [`RequestLifecycle`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestPhase {
    #[default]
    Idle,
    Loading,
    Success(Recommendation),
    Error(String),
}

/// The submit → Loading → (Success | Error) state machine.
///
/// Concurrent submits are allowed: there is no lock and no cancellation, so
/// when two requests overlap both settle and the last settlement wins the
/// visible phase. The sequence number stamped on each submit is carried
/// through the fetch task purely so stale settlements show up in traces.
pub struct RequestLifecycle {
    phase: RequestPhase,
    seq: u64,
    submit_enabled: bool,
}

impl Default for RequestLifecycle {
    fn default() -> Self {
        Self {
            phase: RequestPhase::Idle,
            seq: 0,
            submit_enabled: true,
        }
    }
}

impl RequestLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request cycle: the previous result or error display is
    /// discarded, the results area switches to skeletons, and the submit
    /// affordance is disabled until a settlement arrives.
    pub fn submit(&mut self, request: &MoodRequest) -> u64 {
        self.seq += 1;
        self.phase = RequestPhase::Loading;
        self.submit_enabled = false;

        info!(
            seq = self.seq,
            language = request.language.as_str(),
            preference = request.preference.as_str(),
            "request_submitted"
        );

        self.seq
    }

    /// Applies a settlement. Runs once per submit, for every outcome; the
    /// affordance restore at the end is unconditional.
    pub fn settle(&mut self, seq: u64, outcome: Result<Recommendation, String>) {
        if seq != self.seq {
            debug!(seq, latest = self.seq, "stale_settlement_applied");
        }

        self.phase = match outcome {
            Ok(recommendation) => {
                info!(seq, songs = recommendation.songs.len(), "request_settled");
                RequestPhase::Success(recommendation)
            }
            Err(message) => {
                info!(seq, error = message.as_str(), "request_failed");
                RequestPhase::Error(message)
            }
        };

        self.submit_enabled = true;
    }

    pub fn phase(&self) -> &RequestPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == RequestPhase::Loading
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Track;

    fn request() -> MoodRequest {
        MoodRequest {
            message: "I feel great".to_string(),
            language: "en".to_string(),
            preference: "match".to_string(),
        }
    }

    fn track(name: &str) -> Track {
        Track {
            id: None,
            song_name: name.to_string(),
            artist: "Someone".to_string(),
            image_url: None,
            preview_url: Some(format!("preview://{name}")),
            spotify_url: format!("spotify://{name}"),
        }
    }

    fn recommendation(names: &[&str]) -> Recommendation {
        Recommendation {
            mood: "happy".to_string(),
            songs: names.iter().map(|n| track(n)).collect(),
        }
    }

    #[test]
    fn starts_idle_with_submit_enabled() {
        let lifecycle = RequestLifecycle::new();
        assert_eq!(*lifecycle.phase(), RequestPhase::Idle);
        assert!(lifecycle.submit_enabled());
    }

    #[test]
    fn submit_enters_loading_and_disables_affordance() {
        let mut lifecycle = RequestLifecycle::new();
        lifecycle.submit(&request());
        assert!(lifecycle.is_loading());
        assert!(!lifecycle.submit_enabled());
    }

    #[test]
    fn success_settlement_is_exclusive_and_restores_affordance() {
        let mut lifecycle = RequestLifecycle::new();
        let seq = lifecycle.submit(&request());
        lifecycle.settle(seq, Ok(recommendation(&["A", "B"])));

        assert!(matches!(lifecycle.phase(), RequestPhase::Success(_)));
        assert!(!matches!(lifecycle.phase(), RequestPhase::Error(_)));
        assert!(lifecycle.submit_enabled());
    }

    #[test]
    fn error_settlement_restores_affordance() {
        let mut lifecycle = RequestLifecycle::new();
        let seq = lifecycle.submit(&request());
        lifecycle.settle(seq, Err("rate limited".to_string()));

        assert_eq!(
            *lifecycle.phase(),
            RequestPhase::Error("rate limited".to_string())
        );
        assert!(lifecycle.submit_enabled());
    }

    #[test]
    fn empty_song_list_settles_as_success() {
        let mut lifecycle = RequestLifecycle::new();
        let seq = lifecycle.submit(&request());
        lifecycle.settle(seq, Ok(recommendation(&[])));

        match lifecycle.phase() {
            RequestPhase::Success(r) => assert!(r.songs.is_empty()),
            other => panic!("expected success, got {other:?}"),
        }
        assert!(lifecycle.submit_enabled());
    }

    #[test]
    fn song_order_survives_settlement() {
        let mut lifecycle = RequestLifecycle::new();
        let seq = lifecycle.submit(&request());
        lifecycle.settle(seq, Ok(recommendation(&["A", "B", "C"])));

        match lifecycle.phase() {
            RequestPhase::Success(r) => {
                let names: Vec<&str> = r.songs.iter().map(|s| s.song_name.as_str()).collect();
                assert_eq!(names, ["A", "B", "C"]);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn resubmit_discards_previous_result() {
        let mut lifecycle = RequestLifecycle::new();
        let seq = lifecycle.submit(&request());
        lifecycle.settle(seq, Ok(recommendation(&["A"])));

        lifecycle.submit(&request());
        assert!(lifecycle.is_loading());
        assert!(!lifecycle.submit_enabled());
    }

    #[test]
    fn resubmit_clears_error_display() {
        let mut lifecycle = RequestLifecycle::new();
        let seq = lifecycle.submit(&request());
        lifecycle.settle(seq, Err("boom".to_string()));

        lifecycle.submit(&request());
        assert!(lifecycle.is_loading());
    }

    #[test]
    fn overlapping_submits_last_settlement_wins() {
        let mut lifecycle = RequestLifecycle::new();
        let first = lifecycle.submit(&request());
        let second = lifecycle.submit(&request());

        lifecycle.settle(first, Ok(recommendation(&["A"])));
        lifecycle.settle(second, Err("slow failure".to_string()));
        assert_eq!(
            *lifecycle.phase(),
            RequestPhase::Error("slow failure".to_string())
        );

        // Reversed settlement order: the stale success still wins because
        // it settled last.
        let third = lifecycle.submit(&request());
        let fourth = lifecycle.submit(&request());
        lifecycle.settle(fourth, Err("fast failure".to_string()));
        lifecycle.settle(third, Ok(recommendation(&["B"])));
        assert!(matches!(lifecycle.phase(), RequestPhase::Success(_)));
        assert!(lifecycle.submit_enabled());
    }

    #[test]
    fn every_settlement_reenables_submit() {
        let outcomes: Vec<Result<Recommendation, String>> = vec![
            Ok(recommendation(&["A"])),
            Ok(recommendation(&[])),
            Err("domain".to_string()),
            Err("transport".to_string()),
        ];

        for outcome in outcomes {
            let mut lifecycle = RequestLifecycle::new();
            let seq = lifecycle.submit(&request());
            lifecycle.settle(seq, outcome);
            assert!(lifecycle.submit_enabled());
        }
    }
}
