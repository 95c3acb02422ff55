//! Playback tracking for Tollgate
//!
//! The [`PlaybackTracker`] observes a video-playing surface and converts
//! its raw event stream into the one signal the rest of the system cares
//! about: genuine completion. It owns the [`PlaybackSession`] for the
//! current viewing attempt and applies the clamping policy to whatever
//! the surface reports.
//!
//! Surfaces are polymorphic: anything that can load, play, pause, and
//! rewind media implements [`PlaybackSurface`]. The crate ships
//! [`SimulatedSurface`] as a command-recording double for tests and
//! demos.
//!
//! [`PlaybackSession`]: portal_types::PlaybackSession

#![deny(unsafe_code)]

mod surface;
mod tracker;

pub use surface::{PlaybackSurface, SimulatedSurface, SurfaceCommand};
pub use tracker::PlaybackTracker;
