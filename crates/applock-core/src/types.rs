//! Persisted policy and the lock state machine's state type.

use crate::error::AppLockError;
use serde::{Deserialize, Serialize};

/// Default re-lock window: the app may stay backgrounded this long and
/// still resume unlocked.
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 60_000;

/// Persisted app lock policy.
///
/// Owned by the [`ConfigRepository`](crate::ConfigRepository); the
/// coordinator re-reads it on every policy-sensitive decision and never
/// caches it beyond a single decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppLockConfig {
    /// Whether the app lock feature is turned on.
    pub is_enabled: bool,
    /// How long the app may remain backgrounded before the next
    /// foreground forces re-authentication, in milliseconds.
    #[serde(default = "default_timeout_millis")]
    pub timeout_millis: u64,
}

fn default_timeout_millis() -> u64 {
    DEFAULT_TIMEOUT_MILLIS
}

impl Default for AppLockConfig {
    fn default() -> Self {
        Self {
            is_enabled: false,
            timeout_millis: DEFAULT_TIMEOUT_MILLIS,
        }
    }
}

impl AppLockConfig {
    /// Config with the feature enabled and the default timeout.
    pub fn enabled() -> Self {
        Self {
            is_enabled: true,
            timeout_millis: DEFAULT_TIMEOUT_MILLIS,
        }
    }
}

/// Why authentication cannot currently be performed.
///
/// Produced by the availability checker only when availability is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Hardware exists but no biometric or device credential is set up.
    NotEnrolled,
    /// The device has no usable authentication hardware.
    NoHardware,
    /// Hardware exists but cannot be used right now.
    TemporarilyUnavailable,
    /// The platform could not say why.
    Unknown,
}

/// The authoritative "may the app show content" state.
///
/// Exactly one value exists at any instant; every transition is a total
/// function of (current state, event). Only the coordinator mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AppLockState {
    /// Feature turned off by policy. Content is visible.
    Disabled,
    /// Feature on, but the device cannot authenticate.
    Unavailable { reason: UnavailableReason },
    /// Feature on and available; content hidden, no attempt in flight.
    Locked,
    /// An authentication attempt is in flight. `attempt_id` is a
    /// monotonic token minted by the coordinator; a completion is applied
    /// only while the state still carries the same id.
    Unlocking { attempt_id: u64 },
    /// Content visible. `last_hidden_at` records the monotonic-clock
    /// reading (millis) of the moment the app last left the foreground in
    /// this state, or `None` while foregrounded.
    Unlocked { last_hidden_at: Option<u64> },
    /// The last attempt failed with a non-interruption error. Content
    /// stays hidden; the UI renders the error with a retry affordance.
    Failed { error: AppLockError },
}

impl AppLockState {
    /// True when content may be shown: the feature is off, or the user
    /// has authenticated.
    pub fn is_unlocked(&self) -> bool {
        matches!(
            self,
            AppLockState::Disabled | AppLockState::Unlocked { .. }
        )
    }

    /// True while an authentication attempt is in flight.
    pub fn is_unlocking(&self) -> bool {
        matches!(self, AppLockState::Unlocking { .. })
    }

    /// The in-flight attempt id, if any.
    pub fn attempt_id(&self) -> Option<u64> {
        match self {
            AppLockState::Unlocking { attempt_id } => Some(*attempt_id),
            _ => None,
        }
    }
}
