//! Notification collaborator: fire-and-forget user notices

use portal_types::{Notice, NoticeKind};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Shows notices to the visitor.
///
/// The connect sequence calls this at its two beats ("connecting", then
/// "connected" or a failure) and never waits on the result. Presentation
/// layers implement this over whatever toast/dialog machinery they have.
pub trait PortalNotifier: Send + Sync {
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// Default notifier: routes notices into the tracing stream.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl PortalNotifier for TracingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Info | NoticeKind::Success => info!(?kind, message, "portal notice"),
            NoticeKind::Warning => warn!(?kind, message, "portal notice"),
        }
    }
}

/// Capturing notifier for tests.
///
/// Clones share the same log, so a test can keep one clone and hand the
/// other to the gate.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notice shown so far, in order.
    pub fn notices(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => Vec::new(),
        }
    }
}

impl PortalNotifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        if let Ok(mut guard) = self.notices.lock() {
            guard.push(Notice::new(kind, message));
        }
    }
}
