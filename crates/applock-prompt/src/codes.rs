//! Platform prompt error codes and the fixed mapping into
//! [`AppLockError`].

use applock_core::AppLockError;
use thiserror::Error;

/// The closed set of error codes a platform prompt ceremony can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptErrorCode {
    /// The device has no authentication hardware.
    HardwareNotPresent,
    /// Hardware exists but cannot be used right now.
    HardwareUnavailable,
    /// No biometric is enrolled.
    NoBiometrics,
    /// No device credential (PIN/pattern/password) is set up.
    NoDeviceCredential,
    /// The user dismissed the prompt.
    UserCanceled,
    /// The user pressed the negative action button.
    NegativeButton,
    /// The system tore the prompt down (rotation, backgrounding).
    SystemCanceled,
    /// Rate limited; may carry a remaining duration.
    Lockout,
    /// Rate limited until a stronger credential is used.
    LockoutPermanent,
    /// The prompt timed out waiting for the user.
    Timeout,
    /// The sensor could not process the input.
    UnableToProcess,
    /// No storage space to complete the operation.
    NoSpace,
    /// A vendor-specific error.
    Vendor,
    /// The ceremony could not be started (invalid host state).
    StartFailed,
    /// A code this bridge does not recognize.
    Unrecognized(i32),
}

/// A prompt ceremony failure as reported by the platform backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Prompt error {code:?}: {message}")]
pub struct PromptError {
    pub code: PromptErrorCode,
    pub message: String,
    /// Remaining lockout in seconds, when the platform reports one
    /// alongside [`PromptErrorCode::Lockout`].
    pub lockout_seconds: Option<i64>,
}

impl PromptError {
    pub fn new(code: PromptErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            lockout_seconds: None,
        }
    }

    /// A lockout with a known remaining duration.
    pub fn lockout(seconds: i64, message: impl Into<String>) -> Self {
        Self {
            code: PromptErrorCode::Lockout,
            message: message.into(),
            lockout_seconds: Some(seconds),
        }
    }

    /// A failure to even start the ceremony.
    pub fn start_failed(message: impl Into<String>) -> Self {
        Self::new(PromptErrorCode::StartFailed, message)
    }

    /// Map this platform failure into the closed [`AppLockError`]
    /// taxonomy. Every code maps to exactly one variant.
    pub fn into_app_lock_error(self) -> AppLockError {
        match self.code {
            PromptErrorCode::HardwareNotPresent | PromptErrorCode::HardwareUnavailable => {
                AppLockError::NotAvailable
            }
            PromptErrorCode::NoBiometrics | PromptErrorCode::NoDeviceCredential => {
                AppLockError::NotEnrolled
            }
            PromptErrorCode::UserCanceled | PromptErrorCode::NegativeButton => {
                AppLockError::Canceled
            }
            PromptErrorCode::SystemCanceled => AppLockError::Interrupted,
            PromptErrorCode::Lockout => AppLockError::Lockout {
                duration_seconds: self
                    .lockout_seconds
                    .unwrap_or(AppLockError::LOCKOUT_DURATION_UNKNOWN),
            },
            PromptErrorCode::LockoutPermanent => AppLockError::Lockout {
                duration_seconds: AppLockError::LOCKOUT_DURATION_PERMANENT,
            },
            PromptErrorCode::Timeout
            | PromptErrorCode::UnableToProcess
            | PromptErrorCode::NoSpace
            | PromptErrorCode::Vendor => AppLockError::Failed,
            PromptErrorCode::StartFailed => AppLockError::unable_to_start(self.message),
            PromptErrorCode::Unrecognized(raw) => AppLockError::unable_to_start(format!(
                "unrecognized prompt error {raw}: {}",
                self.message
            )),
        }
    }
}

impl From<PromptError> for AppLockError {
    fn from(err: PromptError) -> Self {
        err.into_app_lock_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(code: PromptErrorCode) -> AppLockError {
        PromptError::new(code, "test").into_app_lock_error()
    }

    #[test]
    fn hardware_codes_map_to_not_available() {
        assert_eq!(map(PromptErrorCode::HardwareNotPresent), AppLockError::NotAvailable);
        assert_eq!(map(PromptErrorCode::HardwareUnavailable), AppLockError::NotAvailable);
    }

    #[test]
    fn enrollment_codes_map_to_not_enrolled() {
        assert_eq!(map(PromptErrorCode::NoBiometrics), AppLockError::NotEnrolled);
        assert_eq!(map(PromptErrorCode::NoDeviceCredential), AppLockError::NotEnrolled);
    }

    #[test]
    fn user_initiated_codes_map_to_canceled() {
        assert_eq!(map(PromptErrorCode::UserCanceled), AppLockError::Canceled);
        assert_eq!(map(PromptErrorCode::NegativeButton), AppLockError::Canceled);
    }

    #[test]
    fn system_cancel_maps_to_interrupted() {
        assert_eq!(map(PromptErrorCode::SystemCanceled), AppLockError::Interrupted);
    }

    #[test]
    fn lockout_with_known_duration() {
        let err = PromptError::lockout(30, "locked out").into_app_lock_error();
        assert_eq!(err, AppLockError::Lockout { duration_seconds: 30 });
    }

    #[test]
    fn lockout_without_duration_uses_unknown_sentinel() {
        assert_eq!(
            map(PromptErrorCode::Lockout),
            AppLockError::Lockout {
                duration_seconds: AppLockError::LOCKOUT_DURATION_UNKNOWN
            }
        );
    }

    #[test]
    fn permanent_lockout_uses_permanent_sentinel() {
        assert_eq!(
            map(PromptErrorCode::LockoutPermanent),
            AppLockError::Lockout {
                duration_seconds: AppLockError::LOCKOUT_DURATION_PERMANENT
            }
        );
    }

    #[test]
    fn transient_codes_map_to_failed() {
        assert_eq!(map(PromptErrorCode::Timeout), AppLockError::Failed);
        assert_eq!(map(PromptErrorCode::UnableToProcess), AppLockError::Failed);
        assert_eq!(map(PromptErrorCode::NoSpace), AppLockError::Failed);
        assert_eq!(map(PromptErrorCode::Vendor), AppLockError::Failed);
    }

    #[test]
    fn start_failure_carries_the_message() {
        let err = PromptError::start_failed("activity is finishing").into_app_lock_error();
        assert_eq!(err, AppLockError::unable_to_start("activity is finishing"));
    }

    #[test]
    fn unrecognized_code_maps_to_unable_to_start_with_raw_code() {
        let err = PromptError::new(PromptErrorCode::Unrecognized(42), "who knows")
            .into_app_lock_error();
        match err {
            AppLockError::UnableToStart { message } => {
                assert!(message.contains("42"));
                assert!(message.contains("who knows"));
            }
            other => panic!("expected UnableToStart, got {:?}", other),
        }
    }
}
