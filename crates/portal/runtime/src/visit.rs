//! One captive-portal visit, from first frame to connected session

use chrono::{DateTime, Utc};
use portal_gate::{AccessGate, ConnectStarted, GatewayClient, PortalNotifier};
use portal_playback::{PlaybackSurface, PlaybackTracker};
use portal_types::{
    GateResult, GateState, PlaybackSession, PortalConfig, SurfaceEvent, VisitId,
};
use tracing::info;

use crate::snapshot::PortalSnapshot;

/// Composes the playback tracker and the access gate for one visit.
///
/// The wiring rule lives here and nowhere else: when the tracker emits
/// its completion signal, the gate's requirement is marked met. The gate
/// never sees the playback session itself, only that one signal, which
/// is what makes the unlock a ratchet: restarting the video resets the
/// session but produces no signal the gate would act on.
pub struct PortalVisit {
    id: VisitId,
    config: PortalConfig,
    tracker: PlaybackTracker,
    gate: AccessGate,
    started_at: DateTime<Utc>,
}

impl PortalVisit {
    pub fn new(config: PortalConfig) -> Self {
        let id = VisitId::new();
        let gate = AccessGate::new(id, &config.connect);
        info!(visit_id = %id, video = %config.video.title, "portal visit started");
        Self {
            id,
            config,
            tracker: PlaybackTracker::new(),
            gate,
            started_at: Utc::now(),
        }
    }

    /// Swap the gateway collaborator (before the first connect).
    pub fn with_gateway(mut self, gateway: impl GatewayClient + 'static) -> Self {
        self.gate = self.gate.with_gateway(gateway);
        self
    }

    /// Swap the notification collaborator (before the first connect).
    pub fn with_notifier(mut self, notifier: impl PortalNotifier + 'static) -> Self {
        self.gate = self.gate.with_notifier(notifier);
        self
    }

    // ── Surface events in ────────────────────────────────────────────

    /// Bind a playback surface and point it at the required video.
    pub fn attach_surface(&mut self, surface: Box<dyn PlaybackSurface>) {
        self.tracker.attach(surface, &self.config.video.url);
    }

    pub fn position_updated(&mut self, current_secs: f64, total_secs: f64) {
        self.tracker.position_updated(current_secs, total_secs);
    }

    pub fn play_state_changed(&mut self, playing: bool) {
        self.tracker.play_state_changed(playing);
    }

    /// The surface reported natural end of the video.
    ///
    /// Returns true when this event unlocked the gate (first genuine
    /// completion of the visit).
    pub async fn playback_ended(&mut self) -> bool {
        if self.tracker.playback_ended() {
            self.gate.mark_requirement_met().await
        } else {
            false
        }
    }

    /// Enum-shaped intake for hosts that batch raw media events.
    ///
    /// Returns true when the event unlocked the gate.
    pub async fn handle_surface_event(&mut self, event: SurfaceEvent) -> bool {
        if self.tracker.handle_event(event) {
            self.gate.mark_requirement_met().await
        } else {
            false
        }
    }

    // ── User intents in ──────────────────────────────────────────────

    /// Route the play/pause intent to the surface.
    pub fn toggle_playback(&mut self) {
        self.tracker.toggle();
    }

    /// Watch-again convenience: rewind and resume. The gate is not
    /// consulted and not touched.
    pub fn restart_playback(&mut self) {
        self.tracker.restart();
    }

    /// Forward the connect intent to the gate.
    pub async fn request_connect(&self) -> GateResult<ConnectStarted> {
        self.gate.request_connect().await
    }

    /// Release an established session (stays unlocked).
    pub async fn disconnect(&self) -> GateResult<()> {
        self.gate.disconnect().await
    }

    // ── Snapshots out ────────────────────────────────────────────────

    /// The read-only view the presentation renders from.
    pub async fn snapshot(&self) -> PortalSnapshot {
        let machine = self.gate.machine_snapshot().await;
        let session = self.tracker.session();
        PortalSnapshot {
            visit_id: self.id,
            video_title: self.config.video.title.clone(),
            gate_state: machine.state(),
            progress_percent: session.progress_percent(),
            playing: session.playing,
            completed: session.completed,
            redirect_url: if machine.state().is_connected() {
                machine.receipt().map(|r| r.redirect_url.clone())
            } else {
                None
            },
            connect_failure: machine.last_failure().map(str::to_string),
        }
    }

    pub async fn gate_state(&self) -> GateState {
        self.gate.current_state().await
    }

    pub fn playback(&self) -> &PlaybackSession {
        self.tracker.session()
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    pub fn id(&self) -> VisitId {
        self.id
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
