//! Connect receipts and gateway grants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Identifier for one portal visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitId(Uuid);

impl VisitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for VisitId {
    fn default() -> Self {
        Self::new()
    }
}

/// What the gateway hands back on successful authorization.
///
/// The redirect URL is opaque to the core: the gateway constructs it
/// (including any identifying parameter such as a username token) and the
/// core only forwards it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GatewayGrant {
    /// Opaque redirect target, e.g. `/login?username=free_user`.
    pub redirect_url: String,
    /// Account label the session was issued for.
    pub account: String,
    /// Session lease offered by the gateway, in seconds.
    pub lease_secs: u64,
}

impl GatewayGrant {
    pub fn lease(&self) -> Duration {
        Duration::from_secs(self.lease_secs)
    }
}

/// Record of one successful connect sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectReceipt {
    pub visit_id: VisitId,
    /// Opaque redirect URL supplied by the gateway, forwarded as-is.
    pub redirect_url: String,
    pub account: String,
    pub lease_secs: u64,
    pub requested_at: DateTime<Utc>,
    pub connected_at: DateTime<Utc>,
}

impl ConnectReceipt {
    pub fn new(visit_id: VisitId, grant: GatewayGrant, requested_at: DateTime<Utc>) -> Self {
        Self {
            visit_id,
            redirect_url: grant.redirect_url,
            account: grant.account,
            lease_secs: grant.lease_secs,
            requested_at,
            connected_at: Utc::now(),
        }
    }

    /// Wall-clock time the connect sequence took.
    pub fn connect_latency_ms(&self) -> i64 {
        (self.connected_at - self.requested_at).num_milliseconds()
    }

    pub fn lease(&self) -> Duration {
        Duration::from_secs(self.lease_secs)
    }
}
