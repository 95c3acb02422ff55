//! Portal Visit Runtime
//!
//! This crate composes the gating workflow for one captive-portal visit:
//! a [`PlaybackTracker`] watching the required video and an [`AccessGate`]
//! guarding the connect action, wired so that the tracker's completion
//! signal is the only thing that ever unlocks the gate.
//!
//! # Architecture
//!
//! [`PortalVisit`] is the main entry point. The presentation layer talks
//! to it through two narrow write paths and one read path:
//!
//! - **Surface events in**: `position_updated`, `play_state_changed`,
//!   `playback_ended` (or [`PortalVisit::handle_surface_event`] for the
//!   enum form).
//! - **User intents in**: `toggle_playback`, `restart_playback`,
//!   `request_connect`, `disconnect`.
//! - **Snapshots out**: [`PortalVisit::snapshot`] returns the read-only
//!   [`PortalSnapshot`] the presentation renders from.
//!
//! # Key Invariants
//!
//! 1. Only the completion signal unlocks the gate; progress percentages
//!    never do.
//! 2. Restarting the video never re-locks an unlocked gate.
//! 3. Duplicate connect requests are absorbed without restarting the
//!    running sequence.
//!
//! # Example
//!
//! ```rust
//! use portal_runtime::PortalVisit;
//! use portal_types::PortalConfig;
//!
//! let mut visit = PortalVisit::new(PortalConfig::default());
//! visit.position_updated(30.0, 120.0);
//! assert_eq!(visit.playback().progress_percent(), 25.0);
//! assert!(!visit.playback().completed);
//! ```
//!
//! [`PlaybackTracker`]: portal_playback::PlaybackTracker
//! [`AccessGate`]: portal_gate::AccessGate

#![deny(unsafe_code)]

pub mod snapshot;
pub mod visit;

pub use snapshot::PortalSnapshot;
pub use visit::PortalVisit;
