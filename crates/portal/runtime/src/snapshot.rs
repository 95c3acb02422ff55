//! Read-only view of a visit for the presentation layer

use portal_types::{GateState, VisitId};
use serde::{Deserialize, Serialize};

/// Everything the presentation layer needs to render one frame of the
/// portal: watch progress, gate state, and the post-connect redirect.
///
/// Snapshots are plain values; holding one grants no write access to the
/// visit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortalSnapshot {
    pub visit_id: VisitId,
    pub video_title: String,
    pub gate_state: GateState,
    pub progress_percent: f64,
    pub playing: bool,
    pub completed: bool,
    /// Gateway redirect URL, present only while connected.
    pub redirect_url: Option<String>,
    /// Reason the most recent connect attempt failed, if it did.
    pub connect_failure: Option<String>,
}

impl PortalSnapshot {
    /// Whether the presentation should enable the connect affordance.
    pub fn connect_available(&self) -> bool {
        self.gate_state.can_connect()
    }
}
