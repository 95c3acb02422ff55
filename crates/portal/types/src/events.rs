//! Event shapes delivered by a playback surface

use serde::{Deserialize, Serialize};

/// The three events a playback surface delivers to the tracker.
///
/// Hosts that receive raw media events can map them into this enum and
/// hand them to the runtime's dispatcher instead of calling the three
/// tracker methods individually.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// Periodic playhead report. `total_secs` is 0 until metadata loads.
    PositionUpdate { current_secs: f64, total_secs: f64 },
    /// The surface started or stopped playing.
    PlayStateChanged { playing: bool },
    /// The video reached its natural end. Fired once per attempt.
    Completed,
}
