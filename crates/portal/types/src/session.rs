//! Playback session: the watch state of the required video

use serde::{Deserialize, Serialize};

/// Watch state for one viewing attempt of the required video.
///
/// The session is owned by the playback tracker and mutated only through
/// the methods below. `completed` is sticky for the attempt: once the
/// surface reports the completion event, later position updates cannot
/// unset it. Only [`PlaybackSession::restart`] clears it, and restarting
/// is a playback convenience that never touches the gate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSession {
    /// Current playhead position in seconds. Always finite and >= 0.
    pub position_secs: f64,
    /// Total duration in seconds. 0 means unknown (metadata not loaded).
    pub duration_secs: f64,
    /// Whether the surface is currently playing.
    pub playing: bool,
    /// Whether the video reached its natural end. Set exactly once per
    /// attempt by the completion event, never derived from position.
    pub completed: bool,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self {
            position_secs: 0.0,
            duration_secs: 0.0,
            playing: false,
            completed: false,
        }
    }

    /// Record a position update from the surface.
    ///
    /// Malformed values (negative, NaN, infinite) are clamped to the last
    /// valid value rather than stored; the surface is an untrusted source.
    /// Returns false when any component of the update was rejected.
    pub fn record_position(&mut self, current_secs: f64, total_secs: f64) -> bool {
        let mut accepted = true;

        if current_secs.is_finite() && current_secs >= 0.0 {
            self.position_secs = current_secs;
        } else {
            accepted = false;
        }

        if total_secs.is_finite() && total_secs >= 0.0 {
            self.duration_secs = total_secs;
        } else {
            accepted = false;
        }

        accepted
    }

    /// Derived watch progress in percent, always within [0, 100].
    ///
    /// While the duration is unknown (0) this is 0, the divide-by-zero
    /// guard the surface contract requires.
    pub fn progress_percent(&self) -> f64 {
        if self.duration_secs > 0.0 {
            (self.position_secs / self.duration_secs * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Record a play/pause notification from the surface.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Record the completion event. Idempotent: returns true only for the
    /// call that actually completed the attempt.
    pub fn mark_completed(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.playing = false;
        true
    }

    /// Reset the attempt for a re-watch: position, playing flag, and
    /// `completed` are cleared. The known duration is kept; the video
    /// has not changed.
    pub fn restart(&mut self) {
        self.position_secs = 0.0;
        self.playing = false;
        self.completed = false;
    }

    /// Whether the duration is known yet.
    pub fn duration_known(&self) -> bool {
        self.duration_secs > 0.0
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_zeroed() {
        let session = PlaybackSession::new();
        assert_eq!(session.position_secs, 0.0);
        assert_eq!(session.duration_secs, 0.0);
        assert!(!session.playing);
        assert!(!session.completed);
        assert_eq!(session.progress_percent(), 0.0);
    }

    #[test]
    fn progress_tracks_position() {
        let mut session = PlaybackSession::new();
        assert!(session.record_position(30.0, 120.0));
        assert_eq!(session.progress_percent(), 25.0);

        session.record_position(119.0, 120.0);
        let progress = session.progress_percent();
        assert!((progress - 99.1666).abs() < 0.01);
        assert!(!session.completed);
    }

    #[test]
    fn unknown_duration_reports_zero_progress() {
        let mut session = PlaybackSession::new();
        assert!(session.record_position(45.0, 0.0));
        assert_eq!(session.progress_percent(), 0.0);
        assert!(!session.duration_known());
    }

    #[test]
    fn malformed_positions_are_clamped() {
        let mut session = PlaybackSession::new();
        session.record_position(30.0, 120.0);

        assert!(!session.record_position(-5.0, 120.0));
        assert_eq!(session.position_secs, 30.0);

        assert!(!session.record_position(f64::NAN, 120.0));
        assert_eq!(session.position_secs, 30.0);

        assert!(!session.record_position(f64::INFINITY, 120.0));
        assert_eq!(session.position_secs, 30.0);

        assert!(!session.record_position(40.0, f64::NAN));
        assert_eq!(session.position_secs, 40.0);
        assert_eq!(session.duration_secs, 120.0);
    }

    #[test]
    fn position_past_duration_caps_at_hundred() {
        let mut session = PlaybackSession::new();
        session.record_position(150.0, 120.0);
        assert_eq!(session.progress_percent(), 100.0);
        assert!(!session.completed);
    }

    #[test]
    fn full_progress_never_implies_completion() {
        let mut session = PlaybackSession::new();
        session.record_position(120.0, 120.0);
        assert_eq!(session.progress_percent(), 100.0);
        assert!(!session.completed);
    }

    #[test]
    fn completion_is_idempotent() {
        let mut session = PlaybackSession::new();
        session.set_playing(true);

        assert!(session.mark_completed());
        assert!(session.completed);
        assert!(!session.playing);

        assert!(!session.mark_completed());
        assert!(session.completed);
    }

    #[test]
    fn completion_survives_later_updates() {
        let mut session = PlaybackSession::new();
        session.record_position(120.0, 120.0);
        session.mark_completed();

        // Out-of-order updates after the end must not unset the flag.
        session.record_position(3.0, 120.0);
        session.set_playing(true);
        assert!(session.completed);
    }

    #[test]
    fn restart_clears_attempt_but_keeps_duration() {
        let mut session = PlaybackSession::new();
        session.record_position(120.0, 120.0);
        session.set_playing(true);
        session.mark_completed();

        session.restart();
        assert_eq!(session.position_secs, 0.0);
        assert_eq!(session.duration_secs, 120.0);
        assert!(!session.playing);
        assert!(!session.completed);
    }

    #[test]
    fn session_serde_roundtrip() {
        let mut session = PlaybackSession::new();
        session.record_position(60.0, 120.0);
        session.set_playing(true);

        let json = serde_json::to_string(&session).unwrap();
        let restored: PlaybackSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
