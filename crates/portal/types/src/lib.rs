//! Portal Domain Types for Tollgate
//!
//! Tollgate portals are NOT login forms. They are **watch-to-unlock
//! workflows**: a required video must be watched to its natural end
//! before the network connect action becomes available.
//!
//! # Key Concepts
//!
//! - **PlaybackSession**: The watch state of the required video for one
//!   viewing attempt: position, duration, playing flag, and the sticky
//!   `completed` flag that only the surface's completion event may set.
//! - **GateStateMachine**: The pure unlock/connect state machine
//!   (`Locked → Unlocked → Connecting → Connected`) with its transition
//!   audit trail. Unlocking is a ratchet: no later event re-locks it.
//! - **ConnectReceipt**: The record of a successful connect: the opaque
//!   gateway redirect URL, the account it was issued for, and timestamps.
//! - **SurfaceEvent**: The three event shapes a playback surface delivers
//!   (position update, play-state change, completion).
//! - **PortalConfig**: Required-video descriptor plus connect-sequence
//!   tuning (delay before the gateway handshake).
//!
//! # Design Principles
//!
//! 1. Completion is event-sourced. A progress percentage of 100 never
//!    implies `completed`; only the surface's completion event does.
//! 2. Unlocking is one-way. Restarting the video resets the session,
//!    never the gate.
//! 3. Gating failures are recoverable typed results, never panics.
//! 4. External collaborators (surface, gateway, notifier) sit behind
//!    traits defined next to the components that drive them.

#![deny(unsafe_code)]

mod config;
mod errors;
mod events;
mod gate;
mod notice;
mod receipt;
mod session;

pub use config::*;
pub use errors::*;
pub use events::*;
pub use gate::*;
pub use notice::*;
pub use receipt::*;
pub use session::*;
