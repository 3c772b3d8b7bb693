//! The closed error taxonomy for authentication attempts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a single authentication attempt.
///
/// `Ok(())` is an accepted ceremony; every failure is one of the closed
/// [`AppLockError`] variants. There is no secondary "unexpected fault"
/// channel; anything the platform throws is mapped into this taxonomy
/// before it reaches a caller.
pub type AppLockResult = Result<(), AppLockError>;

/// Why an authentication attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppLockError {
    /// Authentication hardware is missing or currently unusable.
    #[error("Authentication is not available on this device")]
    NotAvailable,
    /// No biometric or device credential is enrolled.
    #[error("No authentication method is enrolled")]
    NotEnrolled,
    /// The user dismissed the prompt or pressed the negative action.
    #[error("Authentication was canceled")]
    Canceled,
    /// The prompt was torn down by the system (rotation, backgrounding),
    /// not by the user. Recovered silently by the coordinator.
    #[error("Authentication was interrupted")]
    Interrupted,
    /// Rate limited after too many failed attempts.
    ///
    /// `duration_seconds` is the remaining lockout when the platform
    /// reports one, [`AppLockError::LOCKOUT_DURATION_UNKNOWN`] when it
    /// does not, or [`AppLockError::LOCKOUT_DURATION_PERMANENT`] when
    /// only a stronger credential can clear it.
    #[error("Too many failed attempts")]
    Lockout { duration_seconds: i64 },
    /// Generic transient failure (timeout, sensor error, storage error).
    #[error("Authentication failed")]
    Failed,
    /// The prompt could not even be started.
    #[error("Unable to start authentication: {message}")]
    UnableToStart { message: String },
}

impl AppLockError {
    /// Sentinel for a lockout whose remaining duration is not reported.
    pub const LOCKOUT_DURATION_UNKNOWN: i64 = -1;
    /// Sentinel for a lockout that will not expire on its own.
    pub const LOCKOUT_DURATION_PERMANENT: i64 = -2;

    /// Build an [`AppLockError::UnableToStart`] from any message.
    pub fn unable_to_start(message: impl Into<String>) -> Self {
        AppLockError::UnableToStart {
            message: message.into(),
        }
    }

    /// True for system-initiated teardown, which the coordinator recovers
    /// from silently instead of surfacing as a failed state.
    pub fn is_interruption(&self) -> bool {
        matches!(self, AppLockError::Interrupted)
    }
}
