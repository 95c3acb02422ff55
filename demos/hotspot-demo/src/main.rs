//! Tollgate Hotspot Demo
//!
//! Walks one captive-portal visit through the whole flow: locked start,
//! required video, unlock on completion, timed connect, and the session
//! controls available once connected.

use portal_gate::{PortalNotifier, SimulatedGateway};
use portal_playback::SimulatedSurface;
use portal_runtime::{PortalSnapshot, PortalVisit};
use portal_types::{
    ConnectConfig, GateError, GateState, NoticeKind, PortalConfig, VideoConfig,
};

use colored::*;
use std::time::Duration;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    println!(
        "{}",
        "╔══════════════════════════════════════════════════════════════════╗".cyan()
    );
    println!(
        "{}",
        "║                 Tollgate Hotspot Demonstration                   ║".cyan()
    );
    println!(
        "{}",
        "║                                                                  ║".cyan()
    );
    println!(
        "{}",
        "║  One captive-portal visit: watch the required video, unlock      ║".cyan()
    );
    println!(
        "{}",
        "║  the gate, ride the timed connect sequence, get online.          ║".cyan()
    );
    println!(
        "{}",
        "╚══════════════════════════════════════════════════════════════════╝".cyan()
    );
    println!();

    demo_locked_portal().await;
    println!();

    demo_watch_and_connect().await;
    println!();

    demo_gateway_outage().await;
    println!();

    demo_session_controls().await;

    println!();
    println!("{}", "Demo complete!".green().bold());
}

async fn demo_locked_portal() {
    scenario_header("Scenario 1: The Locked Portal");

    let mut visit = new_visit(800);
    println!("  Operation: click CONNECT before watching anything");
    println!();

    match visit.request_connect().await {
        Err(err) => print_rejection(&err, "    "),
        Ok(_) => println!("    unexpected: the gate let us through"),
    }
    print_portal(&visit.snapshot().await, "    ");
    println!();

    println!("  Operation: watch a bit, then click CONNECT again");
    println!();
    visit.play_state_changed(true);
    visit.position_updated(45.0, 120.0);
    print_portal(&visit.snapshot().await, "    ");
    match visit.request_connect().await {
        Err(err) => print_rejection(&err, "    "),
        Ok(_) => println!("    unexpected: the gate let us through"),
    }
    println!(
        "    {} Progress never unlocks the gate; only the completion event does",
        "→".cyan()
    );
}

async fn demo_watch_and_connect() {
    scenario_header("Scenario 2: Watch to the End, Then Connect");

    let mut visit = new_visit(1200);
    println!(
        "  Operation: watch '{}' all the way through",
        visit.config().video.title
    );
    println!();

    visit.play_state_changed(true);
    for position in [0.0f64, 30.0, 60.0, 90.0, 120.0] {
        visit.position_updated(position, 120.0);
        print_portal(&visit.snapshot().await, "    ");
        tokio::time::sleep(Duration::from_millis(150)).await;
    }
    visit.playback_ended().await;
    print_portal(&visit.snapshot().await, "    ");
    println!(
        "    {} The completion event flipped the gate to UNLOCKED",
        "→".cyan()
    );
    println!();

    println!("  Operation: click CONNECT (and click it again, impatiently)");
    println!();
    let started = match visit.request_connect().await {
        Ok(started) => started,
        Err(err) => {
            print_rejection(&err, "    ");
            return;
        }
    };
    print_portal(&visit.snapshot().await, "    ");

    if let Err(err) = visit.request_connect().await {
        print_rejection(&err, "    ");
    }
    println!(
        "    {} The second click is absorbed; the running timer is untouched",
        "→".cyan()
    );

    match started.outcome().await {
        Ok(receipt) => {
            println!();
            println!("    Receipt:");
            println!("      redirect:  {}", receipt.redirect_url.bold());
            println!("      account:   {}", receipt.account);
            println!("      lease:     {}h", receipt.lease_secs / 3600);
            println!("      handshake: {}ms", receipt.connect_latency_ms());
        }
        Err(err) => print_rejection(&err, "    "),
    }
    print_portal(&visit.snapshot().await, "    ");
}

async fn demo_gateway_outage() {
    scenario_header("Scenario 3: Gateway Outage");

    let mut visit = PortalVisit::new(demo_config(400))
        .with_gateway(SimulatedGateway::failing())
        .with_notifier(ConsoleNotifier);
    visit.attach_surface(Box::new(SimulatedSurface::new()));
    finish_video(&mut visit).await;

    println!("  Operation: click CONNECT while the gateway is unreachable");
    println!();
    if let Ok(started) = visit.request_connect().await {
        if let Err(err) = started.outcome().await {
            print_rejection(&err, "    ");
        }
    }
    print_portal(&visit.snapshot().await, "    ");
    println!(
        "    {} A failed attempt lands back on UNLOCKED; the visitor can retry",
        "→".cyan()
    );
}

async fn demo_session_controls() {
    scenario_header("Scenario 4: Session Controls");

    let mut visit = new_visit(400);
    finish_video(&mut visit).await;
    if let Ok(started) = visit.request_connect().await {
        let _ = started.outcome().await;
    }
    print_portal(&visit.snapshot().await, "    ");
    println!();

    println!("  Operation: watch the video again while connected");
    println!();
    visit.restart_playback();
    print_portal(&visit.snapshot().await, "    ");
    println!(
        "    {} Progress reset to zero, yet the session stays CONNECTED",
        "→".cyan()
    );
    println!();

    println!("  Operation: disconnect, then reconnect without re-watching");
    println!();
    if let Err(err) = visit.disconnect().await {
        print_rejection(&err, "    ");
    }
    print_portal(&visit.snapshot().await, "    ");
    if let Ok(started) = visit.request_connect().await {
        let _ = started.outcome().await;
    }
    print_portal(&visit.snapshot().await, "    ");
    println!(
        "    {} The unlock is a ratchet; one complete watch covers the visit",
        "→".cyan()
    );
}

// ---------------------------------------------------------------------------
// Plumbing
// ---------------------------------------------------------------------------

/// Prints notices the way the portal page would toast them.
#[derive(Clone, Copy, Debug, Default)]
struct ConsoleNotifier;

impl PortalNotifier for ConsoleNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Info => println!("    {} {}", "[notice]".cyan(), message),
            NoticeKind::Success => println!("    {} {}", "[notice]".green().bold(), message),
            NoticeKind::Warning => println!("    {} {}", "[notice]".red().bold(), message),
        }
    }
}

fn demo_config(delay_ms: u64) -> PortalConfig {
    PortalConfig {
        video: VideoConfig::default(),
        connect: ConnectConfig { delay_ms },
    }
}

fn new_visit(delay_ms: u64) -> PortalVisit {
    let mut visit = PortalVisit::new(demo_config(delay_ms)).with_notifier(ConsoleNotifier);
    visit.attach_surface(Box::new(SimulatedSurface::new()));
    visit
}

/// Report end of video to the visit without the animated walkthrough.
async fn finish_video(visit: &mut PortalVisit) {
    visit.play_state_changed(true);
    visit.position_updated(120.0, 120.0);
    visit.playback_ended().await;
}

fn scenario_header(title: &str) {
    println!(
        "{}",
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".yellow()
    );
    println!("  {}", title.yellow().bold());
    println!(
        "{}",
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".yellow()
    );
    println!();
}

fn print_portal(snapshot: &PortalSnapshot, indent: &str) {
    let state = match snapshot.gate_state {
        GateState::Locked => "LOCKED".red().bold(),
        GateState::Unlocked => "UNLOCKED".yellow().bold(),
        GateState::Connecting => "CONNECTING".cyan().bold(),
        GateState::Connected => "CONNECTED".green().bold(),
    };
    let mut line = format!(
        "{}Gate: {}  Video: {:.1}%",
        indent, state, snapshot.progress_percent
    );
    if let Some(url) = &snapshot.redirect_url {
        line.push_str(&format!("  Portal: {}", url));
    }
    println!("{}", line);
}

fn print_rejection(err: &GateError, indent: &str) {
    println!("{}Rejected: {}", indent, err.to_string().red());
}
