//! Access gating for Tollgate
//!
//! The [`AccessGate`] owns the unlock/connect state for one portal visit.
//! It consumes the playback tracker's completion signal, validates
//! connect attempts against the current state, and drives the timed
//! connect sequence against the gateway collaborator.
//!
//! # Collaborators
//!
//! - [`GatewayClient`]: authorizes the session and supplies the opaque
//!   redirect URL. [`SimulatedGateway`] is the deterministic default; a
//!   real deployment swaps in an HTTP client behind the same trait.
//! - [`PortalNotifier`]: fire-and-forget user notices ("connecting",
//!   "connected"). [`TracingNotifier`] logs them; [`RecordingNotifier`]
//!   captures them for assertions.
//!
//! # Key Invariants
//!
//! 1. `Locked → Unlocked` happens only on the completion signal.
//! 2. Unlocking is a ratchet; no event re-locks a visit.
//! 3. A second connect request during a running sequence is absorbed and
//!    never restarts the timer.
//! 4. A failed sequence returns the gate to `Unlocked` with the reason
//!    kept for the presentation layer; retrying is permitted.

#![deny(unsafe_code)]

mod gate;
mod gateway;
mod notifier;
mod sequence;

pub use gate::{AccessGate, ConnectStarted};
pub use gateway::{GatewayClient, SimulatedGateway};
pub use notifier::{PortalNotifier, RecordingNotifier, TracingNotifier};
pub use sequence::ConnectSequence;
