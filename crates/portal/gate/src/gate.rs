//! The access gate: one visit's unlock/connect lifecycle

use chrono::{DateTime, Utc};
use portal_types::{
    ConnectConfig, ConnectReceipt, GateError, GateResult, GateState, GateStateMachine, VisitId,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::gateway::GatewayClient;
use crate::notifier::PortalNotifier;
use crate::sequence::ConnectSequence;

/// Handle for a connect sequence that was accepted and is now running.
///
/// Callers may drop it (the sequence finishes on its own and commits the
/// gate state) or await [`ConnectStarted::outcome`] for the receipt.
pub struct ConnectStarted {
    requested_at: DateTime<Utc>,
    task: JoinHandle<GateResult<ConnectReceipt>>,
}

impl ConnectStarted {
    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    /// Wait for the running sequence to finish.
    pub async fn outcome(self) -> GateResult<ConnectReceipt> {
        match self.task.await {
            Ok(result) => result,
            Err(join_err) => Err(GateError::ConnectFailed {
                reason: format!("connect task aborted: {}", join_err),
            }),
        }
    }
}

/// Owns the gate state for one portal visit.
///
/// State lives behind a lock shared with the running connect task; the
/// transition to `Connecting` is committed synchronously inside
/// [`AccessGate::request_connect`], so a second request issued while the
/// sequence timer runs deterministically observes `Connecting` and is
/// absorbed.
pub struct AccessGate {
    visit: VisitId,
    machine: Arc<RwLock<GateStateMachine>>,
    sequence: ConnectSequence,
}

impl AccessGate {
    pub fn new(visit: VisitId, config: &ConnectConfig) -> Self {
        Self {
            visit,
            machine: Arc::new(RwLock::new(GateStateMachine::new())),
            sequence: ConnectSequence::new(config),
        }
    }

    pub fn with_gateway(mut self, gateway: impl GatewayClient + 'static) -> Self {
        self.sequence = self.sequence.with_gateway(gateway);
        self
    }

    pub fn with_notifier(mut self, notifier: impl PortalNotifier + 'static) -> Self {
        self.sequence = self.sequence.with_notifier(notifier);
        self
    }

    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.sequence = self.sequence.with_delay(delay);
        self
    }

    pub fn visit(&self) -> VisitId {
        self.visit
    }

    /// Pure read of the current state.
    pub async fn current_state(&self) -> GateState {
        self.machine.read().await.state()
    }

    /// Clone of the full machine, for snapshots and audit views.
    pub async fn machine_snapshot(&self) -> GateStateMachine {
        self.machine.read().await.clone()
    }

    /// Consume the completion signal from the playback tracker.
    ///
    /// Returns true only for the call that unlocked the gate; later
    /// signals (and signals after a restart) are absorbed. Unlocking is
    /// a ratchet for the visit.
    pub async fn mark_requirement_met(&self) -> bool {
        let mut machine = self.machine.write().await;
        if machine.mark_requirement_met() {
            info!(visit_id = %self.visit, "gate unlocked, connect now available");
            true
        } else {
            debug!(
                visit_id = %self.visit,
                state = %machine.state(),
                "completion signal absorbed, gate already past locked"
            );
            false
        }
    }

    /// Validate a connect request and, if the gate is unlocked, start
    /// the connect sequence.
    ///
    /// While locked this returns [`GateError::NotReady`]; while a
    /// sequence runs or a session is established it returns
    /// [`GateError::AlreadyInProgress`] without touching the running
    /// timer. Both leave the state unchanged.
    pub async fn request_connect(&self) -> GateResult<ConnectStarted> {
        {
            let mut machine = self.machine.write().await;
            if let Err(err) = machine.begin_connect() {
                debug!(
                    visit_id = %self.visit,
                    state = %machine.state(),
                    error = %err,
                    "connect request rejected"
                );
                return Err(err);
            }
        }

        let requested_at = Utc::now();
        let visit = self.visit;
        let machine = Arc::clone(&self.machine);
        let sequence = self.sequence.clone();

        let task = tokio::spawn(async move {
            let result = sequence.run(visit, requested_at).await;
            let mut machine = machine.write().await;
            match result {
                Ok(receipt) => {
                    machine.complete_connect(receipt.clone());
                    info!(
                        visit_id = %visit,
                        redirect_url = %receipt.redirect_url,
                        "session established"
                    );
                    Ok(receipt)
                }
                Err(err) => {
                    let reason = match &err {
                        GateError::ConnectFailed { reason } => reason.clone(),
                        other => other.to_string(),
                    };
                    machine.fail_connect(reason);
                    warn!(
                        visit_id = %visit,
                        error = %err,
                        "connect failed, gate returned to unlocked"
                    );
                    Err(err)
                }
            }
        });

        Ok(ConnectStarted { requested_at, task })
    }

    /// Release an established session. The gate lands in `Unlocked`,
    /// never `Locked`; the watch requirement stays satisfied.
    pub async fn disconnect(&self) -> GateResult<()> {
        let mut machine = self.machine.write().await;
        machine.disconnect()?;
        info!(visit_id = %self.visit, "session released, gate back to unlocked");
        Ok(())
    }
}
