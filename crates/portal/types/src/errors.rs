//! Error types for the gating workflow

/// Errors that can occur in gate operations.
///
/// All of these are local, recoverable conditions. An ill-timed click
/// produces a typed result, never a panic.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GateError {
    /// Connect was requested while the gate is still locked.
    #[error("connect not available: the required video has not been completed")]
    NotReady,

    /// Connect was requested while a sequence is running or a session
    /// is already established. Absorbed as a no-op by callers.
    #[error("a connect sequence is already in progress or established")]
    AlreadyInProgress,

    /// The gateway refused or failed the authorization handshake.
    /// The gate returns to unlocked; retrying is permitted.
    #[error("connect failed: {reason}")]
    ConnectFailed { reason: String },

    /// Disconnect was requested without an established session.
    #[error("no established session to disconnect")]
    NotConnected,
}

/// Result type alias for gate operations
pub type GateResult<T> = Result<T, GateError>;
