//! Playback tracker: turns raw surface events into a completion signal

use portal_types::{PlaybackSession, SurfaceEvent};
use tracing::{debug, info};

use crate::surface::PlaybackSurface;

/// Observes a playback surface and owns the session for the current
/// viewing attempt.
///
/// The tracker is the only writer of its [`PlaybackSession`]. It applies
/// the clamping policy to surface input and emits the completion signal
/// exactly once per attempt; everything downstream (the gate) consumes
/// only that signal, never the raw session.
pub struct PlaybackTracker {
    session: PlaybackSession,
    surface: Option<Box<dyn PlaybackSurface>>,
}

impl PlaybackTracker {
    pub fn new() -> Self {
        Self {
            session: PlaybackSession::new(),
            surface: None,
        }
    }

    /// Bind a surface and start a fresh viewing attempt.
    ///
    /// Resets the session entirely (including duration) and points the
    /// surface at the required video.
    pub fn attach(&mut self, mut surface: Box<dyn PlaybackSurface>, source_url: &str) {
        self.session = PlaybackSession::new();
        surface.load(source_url);
        self.surface = Some(surface);
        debug!(source_url, "playback surface attached");
    }

    /// Intake for the surface's periodic position reports.
    pub fn position_updated(&mut self, current_secs: f64, total_secs: f64) {
        if !self.session.record_position(current_secs, total_secs) {
            debug!(
                current_secs,
                total_secs, "malformed position update clamped to last valid value"
            );
        }
    }

    /// Intake for the surface's play/pause notifications.
    pub fn play_state_changed(&mut self, playing: bool) {
        self.session.set_playing(playing);
    }

    /// Intake for the surface's completion event.
    ///
    /// Returns true only when this call emitted the completion signal;
    /// duplicate events are absorbed here and never reach the gate twice.
    pub fn playback_ended(&mut self) -> bool {
        if self.session.mark_completed() {
            info!(
                progress = self.session.progress_percent(),
                "playback completed, emitting completion signal"
            );
            true
        } else {
            debug!("duplicate completion event absorbed");
            false
        }
    }

    /// Dispatch one surface event to the matching intake method.
    ///
    /// Returns true when the event emitted the completion signal.
    pub fn handle_event(&mut self, event: SurfaceEvent) -> bool {
        match event {
            SurfaceEvent::PositionUpdate {
                current_secs,
                total_secs,
            } => {
                self.position_updated(current_secs, total_secs);
                false
            }
            SurfaceEvent::PlayStateChanged { playing } => {
                self.play_state_changed(playing);
                false
            }
            SurfaceEvent::Completed => self.playback_ended(),
        }
    }

    /// Start the attempt over: rewind the surface and resume playback.
    ///
    /// Clears the session's position and `completed` flag. Emits no
    /// un-completion signal; a gate that already unlocked stays unlocked.
    pub fn restart(&mut self) {
        self.session.restart();
        if let Some(surface) = self.surface.as_mut() {
            surface.rewind();
            surface.play();
        }
        info!("playback restarted");
    }

    /// Route the presentation's play/pause intent to the surface.
    ///
    /// The session's `playing` flag is not touched here; it updates when
    /// the surface reports the resulting play-state event.
    pub fn toggle(&mut self) {
        let playing = self.session.playing;
        match self.surface.as_mut() {
            Some(surface) if playing => surface.pause(),
            Some(surface) => surface.play(),
            None => debug!("toggle ignored, no surface attached"),
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn progress_percent(&self) -> f64 {
        self.session.progress_percent()
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }
}

impl Default for PlaybackTracker {
    fn default() -> Self {
        Self::new()
    }
}
