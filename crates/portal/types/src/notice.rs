//! User-facing notices emitted by the connect sequence

use serde::{Deserialize, Serialize};

/// Severity of a notice shown to the visitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    /// Progress information, e.g. "connecting".
    Info,
    /// The happy ending, e.g. "connected".
    Success,
    /// Something recoverable went wrong, e.g. a failed handshake.
    Warning,
}

/// A notice as delivered to the notification collaborator.
///
/// Fire-and-forget: the core never waits on a notice being displayed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
