//! End-to-end gating flow: from first frame to connected session.
//!
//! Exercises the full wiring, from surface events through the completion
//! signal to the timed connect sequence, including the rapid-fire and
//! failure paths.

use portal_gate::{RecordingNotifier, SimulatedGateway};
use portal_playback::{SimulatedSurface, SurfaceCommand};
use portal_runtime::PortalVisit;
use portal_types::{
    ConnectConfig, GateError, GateState, NoticeKind, PortalConfig, SurfaceEvent, VideoConfig,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn quick_config(delay_ms: u64) -> PortalConfig {
    PortalConfig {
        video: VideoConfig::default(),
        connect: ConnectConfig { delay_ms },
    }
}

fn attached_visit(delay_ms: u64) -> (PortalVisit, SimulatedSurface) {
    let surface = SimulatedSurface::new();
    let mut visit = PortalVisit::new(quick_config(delay_ms));
    visit.attach_surface(Box::new(surface.clone()));
    (visit, surface)
}

/// Drive the visit through a complete watch of a 120 second video.
async fn watch_to_completion(visit: &mut PortalVisit) {
    visit.play_state_changed(true);
    for position in [0.0, 30.0, 60.0, 90.0, 119.0, 120.0] {
        visit.position_updated(position, 120.0);
    }
    visit.playback_ended().await;
}

// ---------------------------------------------------------------------------
// Scenario walkthrough
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fresh_visit_is_locked_with_zero_progress() {
    let (mut visit, _surface) = attached_visit(10);
    visit.position_updated(0.0, 120.0);

    let snapshot = visit.snapshot().await;
    assert_eq!(snapshot.gate_state, GateState::Locked);
    assert_eq!(snapshot.progress_percent, 0.0);
    assert!(!snapshot.completed);
    assert!(!snapshot.connect_available());
}

#[tokio::test]
async fn near_end_progress_is_reported_but_stays_locked() {
    let (mut visit, _surface) = attached_visit(10);
    visit.position_updated(119.0, 120.0);

    let snapshot = visit.snapshot().await;
    assert!((snapshot.progress_percent - 99.1666).abs() < 0.01);
    assert!(!snapshot.completed);
    assert_eq!(snapshot.gate_state, GateState::Locked);
}

#[tokio::test]
async fn completion_event_unlocks_the_gate() {
    let (mut visit, _surface) = attached_visit(10);
    watch_to_completion(&mut visit).await;

    let snapshot = visit.snapshot().await;
    assert!(snapshot.completed);
    assert_eq!(snapshot.gate_state, GateState::Unlocked);
    assert!(snapshot.connect_available());
}

#[tokio::test]
async fn connect_establishes_after_the_configured_delay() {
    let (mut visit, _surface) = attached_visit(15);
    watch_to_completion(&mut visit).await;

    let started = visit.request_connect().await.unwrap();
    assert_eq!(visit.gate_state().await, GateState::Connecting);

    let requested_at = started.requested_at();
    let receipt = started.outcome().await.unwrap();
    assert_eq!(receipt.redirect_url, "/login?username=free_user");
    assert_eq!(receipt.requested_at, requested_at);

    let snapshot = visit.snapshot().await;
    assert_eq!(snapshot.gate_state, GateState::Connected);
    assert_eq!(
        snapshot.redirect_url.as_deref(),
        Some("/login?username=free_user")
    );
}

#[tokio::test]
async fn restart_then_connect_while_connected_is_absorbed() {
    let (mut visit, _surface) = attached_visit(10);
    watch_to_completion(&mut visit).await;
    visit.request_connect().await.unwrap().outcome().await.unwrap();

    visit.restart_playback();
    let snapshot = visit.snapshot().await;
    assert_eq!(snapshot.progress_percent, 0.0);
    assert!(!snapshot.completed);
    // The established session is untouched by the re-watch.
    assert_eq!(snapshot.gate_state, GateState::Connected);

    let result = visit.request_connect().await;
    assert!(matches!(result, Err(GateError::AlreadyInProgress)));
    assert_eq!(visit.gate_state().await, GateState::Connected);
}

// ---------------------------------------------------------------------------
// Rejections and rapid fire
// ---------------------------------------------------------------------------

#[tokio::test]
async fn early_connect_is_rejected_and_mutates_nothing() {
    let (mut visit, _surface) = attached_visit(10);
    visit.position_updated(45.0, 120.0);

    let result = visit.request_connect().await;
    assert!(matches!(result, Err(GateError::NotReady)));

    let snapshot = visit.snapshot().await;
    assert_eq!(snapshot.gate_state, GateState::Locked);
    assert_eq!(snapshot.progress_percent, 37.5);
    assert!(visit.gate().machine_snapshot().await.transitions().is_empty());
}

#[tokio::test]
async fn seeking_to_the_end_never_unlocks() {
    let (mut visit, _surface) = attached_visit(10);
    visit.position_updated(120.0, 120.0);

    let snapshot = visit.snapshot().await;
    assert_eq!(snapshot.progress_percent, 100.0);
    assert_eq!(snapshot.gate_state, GateState::Locked);
    assert!(matches!(
        visit.request_connect().await,
        Err(GateError::NotReady)
    ));
}

#[tokio::test]
async fn double_click_during_the_sequence_does_not_restart_the_timer() {
    let (mut visit, _surface) = attached_visit(50);
    watch_to_completion(&mut visit).await;

    let started = visit.request_connect().await.unwrap();
    let second = visit.request_connect().await;
    assert!(matches!(second, Err(GateError::AlreadyInProgress)));

    started.outcome().await.unwrap();
    // Exactly one requested/established pair in the audit trail.
    let machine = visit.gate().machine_snapshot().await;
    assert_eq!(machine.transitions().len(), 3);
}

#[tokio::test]
async fn restart_during_the_sequence_does_not_cancel_it() {
    let (mut visit, _surface) = attached_visit(40);
    watch_to_completion(&mut visit).await;

    let started = visit.request_connect().await.unwrap();
    visit.restart_playback();

    started.outcome().await.unwrap();
    let snapshot = visit.snapshot().await;
    assert_eq!(snapshot.gate_state, GateState::Connected);
    assert_eq!(snapshot.progress_percent, 0.0);
}

#[tokio::test]
async fn rapid_fire_duplicate_events_stay_consistent() {
    let (mut visit, _surface) = attached_visit(10);
    visit.play_state_changed(true);

    for _ in 0..50 {
        visit.position_updated(120.0, 120.0);
        visit.position_updated(f64::NAN, -1.0);
    }
    for _ in 0..5 {
        visit.playback_ended().await;
    }

    let machine = visit.gate().machine_snapshot().await;
    // One unlock, no matter how noisy the surface was.
    assert_eq!(machine.transitions().len(), 1);
    assert_eq!(machine.state(), GateState::Unlocked);

    let snapshot = visit.snapshot().await;
    assert_eq!(snapshot.progress_percent, 100.0);
}

// ---------------------------------------------------------------------------
// Failure path, disconnect, notifications
// ---------------------------------------------------------------------------

#[tokio::test]
async fn gateway_failure_surfaces_the_reason_and_permits_retry() {
    let surface = SimulatedSurface::new();
    let mut visit =
        PortalVisit::new(quick_config(10)).with_gateway(SimulatedGateway::failing());
    visit.attach_surface(Box::new(surface));
    watch_to_completion(&mut visit).await;

    let started = visit.request_connect().await.unwrap();
    let outcome = started.outcome().await;
    assert!(matches!(outcome, Err(GateError::ConnectFailed { .. })));

    let snapshot = visit.snapshot().await;
    assert_eq!(snapshot.gate_state, GateState::Unlocked);
    assert!(snapshot
        .connect_failure
        .as_deref()
        .unwrap()
        .contains("gateway unreachable"));

    // Retry is permitted.
    assert!(visit.request_connect().await.is_ok());
}

#[tokio::test]
async fn disconnect_returns_to_unlocked_and_reconnect_works() {
    let (mut visit, _surface) = attached_visit(10);
    watch_to_completion(&mut visit).await;
    visit.request_connect().await.unwrap().outcome().await.unwrap();

    visit.disconnect().await.unwrap();
    let snapshot = visit.snapshot().await;
    assert_eq!(snapshot.gate_state, GateState::Unlocked);
    assert!(snapshot.redirect_url.is_none());

    visit.request_connect().await.unwrap().outcome().await.unwrap();
    assert_eq!(visit.gate_state().await, GateState::Connected);
}

#[tokio::test]
async fn connect_notifies_in_two_beats() {
    let notifier = RecordingNotifier::new();
    let surface = SimulatedSurface::new();
    let mut visit = PortalVisit::new(quick_config(10)).with_notifier(notifier.clone());
    visit.attach_surface(Box::new(surface));
    watch_to_completion(&mut visit).await;

    visit.request_connect().await.unwrap().outcome().await.unwrap();

    let notices = notifier.notices();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0].kind, NoticeKind::Info);
    assert!(notices[0].message.contains("Connecting"));
    assert_eq!(notices[1].kind, NoticeKind::Success);
    assert!(notices[1].message.contains("Connected"));
}

// ---------------------------------------------------------------------------
// Intent routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn playback_intents_reach_the_surface() {
    let (mut visit, surface) = attached_visit(10);

    visit.toggle_playback();
    visit.play_state_changed(true);
    visit.toggle_playback();
    visit.restart_playback();

    let commands = surface.commands();
    assert_eq!(
        commands,
        vec![
            SurfaceCommand::Load(VideoConfig::default().url),
            SurfaceCommand::Play,
            SurfaceCommand::Pause,
            SurfaceCommand::Rewind,
            SurfaceCommand::Play,
        ]
    );
}

#[tokio::test]
async fn enum_events_drive_the_same_flow() {
    let (mut visit, _surface) = attached_visit(10);

    visit
        .handle_surface_event(SurfaceEvent::PlayStateChanged { playing: true })
        .await;
    visit
        .handle_surface_event(SurfaceEvent::PositionUpdate {
            current_secs: 120.0,
            total_secs: 120.0,
        })
        .await;
    assert_eq!(visit.gate_state().await, GateState::Locked);

    let unlocked = visit.handle_surface_event(SurfaceEvent::Completed).await;
    assert!(unlocked);
    assert_eq!(visit.gate_state().await, GateState::Unlocked);

    // The duplicate is absorbed before it reaches the gate.
    let unlocked_again = visit.handle_surface_event(SurfaceEvent::Completed).await;
    assert!(!unlocked_again);
}
