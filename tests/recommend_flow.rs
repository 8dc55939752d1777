use std::cell::{Cell, RefCell};

use moodtune::audio::coordinator::PlaybackCoordinator;
use moodtune::audio::state::{ControlHandle, ControlIcon};
use moodtune::audio::traits::PreviewOutput;
use moodtune::model::{MoodRequest, Recommendation, Track};
use moodtune::request::lifecycle::{RequestLifecycle, RequestPhase};

struct FakeOutput {
    source: RefCell<Option<String>>,
    paused: Cell<bool>,
}

impl FakeOutput {
    fn new() -> Self {
        Self {
            source: RefCell::new(None),
            paused: Cell::new(true),
        }
    }
}

impl PreviewOutput for FakeOutput {
    fn set_source(&self, url: &str) {
        *self.source.borrow_mut() = Some(url.to_string());
    }

    fn play(&self) {
        self.paused.set(false);
    }

    fn pause(&self) {
        self.paused.set(true);
    }

    fn is_paused(&self) -> bool {
        self.paused.get()
    }

    fn source(&self) -> Option<String> {
        self.source.borrow().clone()
    }
}

fn request(message: &str) -> MoodRequest {
    MoodRequest {
        message: message.to_string(),
        language: "en".to_string(),
        preference: "pop".to_string(),
    }
}

fn track(name: &str, artist: &str, preview: Option<&str>) -> Track {
    Track {
        id: None,
        song_name: name.to_string(),
        artist: artist.to_string(),
        image_url: None,
        preview_url: preview.map(str::to_string),
        spotify_url: format!("spotify://{name}"),
    }
}

fn happy(songs: Vec<Track>) -> Recommendation {
    Recommendation {
        mood: "happy".to_string(),
        songs,
    }
}

/// Checks that at most one control carries the playing marker, and that it
/// matches the shared output's non-paused source.
fn assert_playback_invariant(playback: &PlaybackCoordinator<FakeOutput>) {
    let marked: Vec<ControlHandle> = (0..32)
        .map(ControlHandle)
        .filter(|c| playback.visual(*c).playing_marker)
        .collect();
    assert!(marked.len() <= 1, "more than one control marked playing");

    match playback.current() {
        Some(active) => {
            assert_eq!(marked, [active.control]);
            assert_eq!(playback.output().source().as_deref(), Some(active.url.as_str()));
        }
        None => assert!(marked.is_empty()),
    }
}

#[test]
fn submit_settle_toggle_happy_path() {
    let mut lifecycle = RequestLifecycle::new();
    let seq = lifecycle.submit(&request("I feel great"));
    assert!(lifecycle.is_loading());
    assert!(!lifecycle.submit_enabled());

    lifecycle.settle(seq, Ok(happy(vec![track("X", "Y", Some("u1"))])));
    assert!(lifecycle.submit_enabled());
    let songs = match lifecycle.phase() {
        RequestPhase::Success(r) => {
            assert_eq!(r.mood, "happy");
            &r.songs
        }
        other => panic!("expected success, got {other:?}"),
    };
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].song_name, "X");
    assert_eq!(songs[0].artist, "Y");
    assert!(songs[0].has_preview());

    let mut playback = PlaybackCoordinator::new(FakeOutput::new());
    playback.toggle("u1", ControlHandle(0));

    assert_eq!(playback.output().source().as_deref(), Some("u1"));
    assert!(!playback.output().is_paused());
    assert_eq!(playback.visual(ControlHandle(0)).icon, ControlIcon::Pause);
    assert_playback_invariant(&playback);
}

#[test]
fn domain_error_settlement_shows_error_and_reenables_submit() {
    let mut lifecycle = RequestLifecycle::new();
    let seq = lifecycle.submit(&request("ugh"));
    lifecycle.settle(seq, Err("rate limited".to_string()));

    assert_eq!(
        *lifecycle.phase(),
        RequestPhase::Error("rate limited".to_string())
    );
    assert!(lifecycle.submit_enabled());
}

#[test]
fn exactly_one_outcome_is_visible_after_settlement() {
    let outcomes: Vec<Result<Recommendation, String>> = vec![
        Ok(happy(vec![track("A", "B", None)])),
        Ok(happy(vec![])),
        Err("boom".to_string()),
    ];

    for outcome in outcomes {
        let mut lifecycle = RequestLifecycle::new();
        let seq = lifecycle.submit(&request("hello"));
        lifecycle.settle(seq, outcome);

        let success = matches!(lifecycle.phase(), RequestPhase::Success(_));
        let error = matches!(lifecycle.phase(), RequestPhase::Error(_));
        assert!(success ^ error, "exactly one outcome must be visible");
        assert!(lifecycle.submit_enabled());
    }
}

#[test]
fn switching_previews_keeps_one_control_playing() {
    let songs = [
        track("A", "One", Some("a")),
        track("B", "Two", Some("b")),
        track("C", "Three", None),
    ];
    let mut playback = PlaybackCoordinator::new(FakeOutput::new());

    playback.toggle(songs[0].preview_url.as_deref().unwrap(), ControlHandle(0));
    assert_playback_invariant(&playback);

    playback.toggle(songs[1].preview_url.as_deref().unwrap(), ControlHandle(1));
    assert_eq!(playback.output().source().as_deref(), Some("b"));
    assert_eq!(playback.visual(ControlHandle(0)).icon, ControlIcon::Play);
    assert_eq!(playback.visual(ControlHandle(1)).icon, ControlIcon::Pause);
    assert_playback_invariant(&playback);
}

#[test]
fn toggle_pause_toggle_restarts_the_same_preview() {
    let mut playback = PlaybackCoordinator::new(FakeOutput::new());

    playback.toggle("u1", ControlHandle(0));
    playback.toggle("u1", ControlHandle(0));
    assert!(playback.output().is_paused());

    // The output reports the pause back; only then is the control cleared.
    playback.on_pause();
    assert!(playback.current().is_none());
    assert_playback_invariant(&playback);

    playback.toggle("u1", ControlHandle(0));
    assert!(!playback.output().is_paused());
    assert_playback_invariant(&playback);
}

#[test]
fn ended_preview_unmarks_the_control() {
    let mut playback = PlaybackCoordinator::new(FakeOutput::new());
    playback.toggle("u1", ControlHandle(2));

    playback.output().pause();
    playback.on_ended();

    assert!(playback.current().is_none());
    assert_eq!(playback.visual(ControlHandle(2)).icon, ControlIcon::Play);
    assert_playback_invariant(&playback);
}

#[test]
fn new_result_set_invalidates_playback_bookkeeping() {
    let mut lifecycle = RequestLifecycle::new();
    let mut playback = PlaybackCoordinator::new(FakeOutput::new());

    let seq = lifecycle.submit(&request("first"));
    lifecycle.settle(seq, Ok(happy(vec![track("A", "One", Some("a"))])));
    playback.toggle("a", ControlHandle(0));
    assert!(playback.current().is_some());

    // Second submit: the grid is replaced by skeletons, every handle is
    // stale.
    lifecycle.submit(&request("second"));
    playback.detach_controls();

    assert!(playback.current().is_none());
    assert!(!playback.visual(ControlHandle(0)).playing_marker);
    assert_playback_invariant(&playback);
}

#[test]
fn overlapping_submits_settle_independently_and_last_wins() {
    let mut lifecycle = RequestLifecycle::new();
    let first = lifecycle.submit(&request("one"));
    let second = lifecycle.submit(&request("two"));

    lifecycle.settle(first, Err("first failed".to_string()));
    assert!(lifecycle.submit_enabled());

    lifecycle.settle(second, Ok(happy(vec![track("A", "One", None)])));
    assert!(matches!(lifecycle.phase(), RequestPhase::Success(_)));
    assert!(lifecycle.submit_enabled());
}
