//! Gate state machine: manages the unlock/connect lifecycle
//!
//! The machine is pure and synchronous. Asynchronous orchestration (the
//! timed connect sequence, gateway calls) lives in the gate crate; every
//! state mutation funnels through the methods here so the transition
//! table stays in one place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ConnectReceipt, GateError, GateResult};

/// Access state for one portal visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateState {
    /// Initial state: the required video has not been completed.
    Locked,
    /// Requirement met; the connect action is available.
    Unlocked,
    /// A connect sequence is running.
    Connecting,
    /// A network session is established.
    Connected,
}

impl GateState {
    pub fn is_locked(&self) -> bool {
        matches!(self, GateState::Locked)
    }

    /// Whether a connect request would start a sequence right now.
    pub fn can_connect(&self) -> bool {
        matches!(self, GateState::Unlocked)
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, GateState::Connected)
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GateState::Locked => "LOCKED",
            GateState::Unlocked => "UNLOCKED",
            GateState::Connecting => "CONNECTING",
            GateState::Connected => "CONNECTED",
        };
        write!(f, "{}", label)
    }
}

/// Why a transition happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionCause {
    /// The playback tracker reported genuine completion.
    RequirementMet,
    /// A connect request was accepted.
    ConnectRequested,
    /// The connect sequence finished and the gateway issued a redirect.
    ConnectEstablished,
    /// The connect sequence failed; the gate returned to unlocked.
    ConnectFailed,
    /// The established session was released.
    Disconnected,
}

/// One recorded transition, kept as an audit trail for the visit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateTransition {
    pub from: GateState,
    pub to: GateState,
    pub cause: TransitionCause,
    pub at: DateTime<Utc>,
}

/// The unlock/connect state machine for one portal visit.
///
/// Transition table:
///
/// - `Locked → Unlocked` only via [`mark_requirement_met`], i.e. the
///   completion signal. At most once per visit.
/// - `Unlocked → Connecting` via [`begin_connect`]. While locked the
///   request is rejected with [`GateError::NotReady`]; while connecting
///   or connected it is rejected with [`GateError::AlreadyInProgress`].
/// - `Connecting → Connected` via [`complete_connect`].
/// - `Connecting → Unlocked` via [`fail_connect`] (retry permitted).
/// - `Connected → Unlocked` via [`disconnect`].
/// - No transition ever returns to `Locked`. Unlocking is a ratchet:
///   restarting the video resets the playback session, never the gate.
///
/// [`mark_requirement_met`]: GateStateMachine::mark_requirement_met
/// [`begin_connect`]: GateStateMachine::begin_connect
/// [`complete_connect`]: GateStateMachine::complete_connect
/// [`fail_connect`]: GateStateMachine::fail_connect
/// [`disconnect`]: GateStateMachine::disconnect
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GateStateMachine {
    state: GateState,
    transitions: Vec<GateTransition>,
    unlocked_at: Option<DateTime<Utc>>,
    last_failure: Option<String>,
    receipt: Option<ConnectReceipt>,
}

impl GateStateMachine {
    pub fn new() -> Self {
        Self {
            state: GateState::Locked,
            transitions: Vec::new(),
            unlocked_at: None,
            last_failure: None,
            receipt: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Whether the watch requirement has ever been satisfied this visit.
    pub fn requirement_met(&self) -> bool {
        !self.state.is_locked()
    }

    /// Consume the completion signal. Returns true only for the call
    /// that actually unlocked the gate; duplicate signals are absorbed.
    pub fn mark_requirement_met(&mut self) -> bool {
        if self.state != GateState::Locked {
            return false;
        }
        self.unlocked_at = Some(Utc::now());
        self.record(GateState::Unlocked, TransitionCause::RequirementMet);
        true
    }

    /// Validate and begin a connect sequence.
    pub fn begin_connect(&mut self) -> GateResult<()> {
        match self.state {
            GateState::Locked => Err(GateError::NotReady),
            GateState::Connecting | GateState::Connected => Err(GateError::AlreadyInProgress),
            GateState::Unlocked => {
                self.record(GateState::Connecting, TransitionCause::ConnectRequested);
                Ok(())
            }
        }
    }

    /// Commit a successful connect sequence. Returns false (and changes
    /// nothing) unless a sequence is in flight.
    pub fn complete_connect(&mut self, receipt: ConnectReceipt) -> bool {
        if self.state != GateState::Connecting {
            return false;
        }
        self.last_failure = None;
        self.receipt = Some(receipt);
        self.record(GateState::Connected, TransitionCause::ConnectEstablished);
        true
    }

    /// Record a failed connect sequence: back to unlocked, reason kept
    /// for the presentation layer, retry permitted.
    pub fn fail_connect(&mut self, reason: impl Into<String>) -> bool {
        if self.state != GateState::Connecting {
            return false;
        }
        self.last_failure = Some(reason.into());
        self.record(GateState::Unlocked, TransitionCause::ConnectFailed);
        true
    }

    /// Release an established session. Lands in `Unlocked`, never
    /// `Locked`; the watch requirement stays satisfied.
    pub fn disconnect(&mut self) -> GateResult<()> {
        if self.state != GateState::Connected {
            return Err(GateError::NotConnected);
        }
        self.record(GateState::Unlocked, TransitionCause::Disconnected);
        Ok(())
    }

    /// The recorded transition history, oldest first.
    pub fn transitions(&self) -> &[GateTransition] {
        &self.transitions
    }

    /// Receipt of the most recent successful connect, if any.
    pub fn receipt(&self) -> Option<&ConnectReceipt> {
        self.receipt.as_ref()
    }

    /// Reason the most recent connect sequence failed, if it did.
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    pub fn unlocked_at(&self) -> Option<DateTime<Utc>> {
        self.unlocked_at
    }

    // ── Internal helpers ─────────────────────────────────────────────

    fn record(&mut self, to: GateState, cause: TransitionCause) {
        self.transitions.push(GateTransition {
            from: self.state,
            to,
            cause,
            at: Utc::now(),
        });
        self.state = to;
    }
}

impl Default for GateStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
