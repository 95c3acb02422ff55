//! Gateway collaborator: authorizes sessions and mints redirect URLs

use async_trait::async_trait;
use portal_types::{GateError, GateResult, GatewayGrant, VisitId};

/// Authorizes a visit against the network gateway.
///
/// The grant's redirect URL is constructed entirely by the gateway; the
/// core forwards it opaquely and never parses it.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn authorize(&self, visit: VisitId) -> GateResult<GatewayGrant>;
}

/// Deterministic gateway for demos and tests.
///
/// Mints a hotspot-style redirect carrying a username token, e.g.
/// `/login?username=free_user`, and always answers the same way: success
/// for [`SimulatedGateway::passing`], a refused handshake for
/// [`SimulatedGateway::failing`].
pub struct SimulatedGateway {
    reachable: bool,
    username: String,
    login_path: String,
    lease_secs: u64,
}

impl SimulatedGateway {
    pub fn passing() -> Self {
        Self {
            reachable: true,
            username: "free_user".to_string(),
            login_path: "/login".to_string(),
            lease_secs: 7200,
        }
    }

    pub fn failing() -> Self {
        Self {
            reachable: false,
            ..Self::passing()
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }

    pub fn with_lease_secs(mut self, lease_secs: u64) -> Self {
        self.lease_secs = lease_secs;
        self
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::passing()
    }
}

#[async_trait]
impl GatewayClient for SimulatedGateway {
    async fn authorize(&self, _visit: VisitId) -> GateResult<GatewayGrant> {
        if !self.reachable {
            return Err(GateError::ConnectFailed {
                reason: "gateway unreachable".to_string(),
            });
        }
        Ok(GatewayGrant {
            redirect_url: format!("{}?username={}", self.login_path, self.username),
            account: self.username.clone(),
            lease_secs: self.lease_secs,
        })
    }
}
