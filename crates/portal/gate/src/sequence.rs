//! Connect sequence: the timed path from unlocked to connected

use chrono::{DateTime, Utc};
use portal_types::{ConnectConfig, ConnectReceipt, GateError, GateResult, NoticeKind, VisitId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::gateway::{GatewayClient, SimulatedGateway};
use crate::notifier::{PortalNotifier, TracingNotifier};

/// Runs the bounded connect sequence for one request.
///
/// The sequence is: notify "connecting", hold for the configured delay
/// (the "establishing connection" phase), authorize against the gateway,
/// then notify the outcome. With the simulated gateway the sequence is
/// fully deterministic.
#[derive(Clone)]
pub struct ConnectSequence {
    delay: Duration,
    gateway: Arc<dyn GatewayClient>,
    notifier: Arc<dyn PortalNotifier>,
}

impl ConnectSequence {
    pub fn new(config: &ConnectConfig) -> Self {
        Self {
            delay: config.delay(),
            gateway: Arc::new(SimulatedGateway::passing()),
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_gateway(mut self, gateway: impl GatewayClient + 'static) -> Self {
        self.gateway = Arc::new(gateway);
        self
    }

    pub fn with_notifier(mut self, notifier: impl PortalNotifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run the sequence once. `requested_at` is when the gate accepted
    /// the request; it ends up on the receipt.
    pub async fn run(
        &self,
        visit: VisitId,
        requested_at: DateTime<Utc>,
    ) -> GateResult<ConnectReceipt> {
        self.notifier.notify(
            NoticeKind::Info,
            "Connecting... please wait while we connect you to the network.",
        );
        info!(
            visit_id = %visit,
            delay_ms = self.delay.as_millis() as u64,
            "connect sequence started"
        );

        tokio::time::sleep(self.delay).await;

        match self.gateway.authorize(visit).await {
            Ok(grant) => {
                info!(
                    visit_id = %visit,
                    redirect_url = %grant.redirect_url,
                    account = %grant.account,
                    "gateway issued redirect"
                );
                self.notifier.notify(
                    NoticeKind::Success,
                    "Connected! Enjoy your free high-speed internet session.",
                );
                Ok(ConnectReceipt::new(visit, grant, requested_at))
            }
            Err(err) => {
                let reason = match &err {
                    GateError::ConnectFailed { reason } => reason.clone(),
                    other => other.to_string(),
                };
                warn!(visit_id = %visit, reason = %reason, "connect sequence failed");
                self.notifier.notify(
                    NoticeKind::Warning,
                    &format!("Connection failed: {}. You can try again.", reason),
                );
                Err(err)
            }
        }
    }
}
