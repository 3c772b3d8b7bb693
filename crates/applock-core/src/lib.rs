//! # Applock Core
//!
//! Shared vocabulary for the app lock subsystem: the persisted policy,
//! the lock state machine's state type, the closed error taxonomy, and
//! the seams the coordinator consumes (config repository, availability
//! checker, authenticator, lifecycle hooks).
//!
//! The coordinator itself lives in `applock-coordinator`; default
//! collaborator implementations live in `applock-config-store` and
//! `applock-prompt`. This crate is pure types and traits so every layer
//! can depend on it without dragging in a runtime.
//!
//! ## Key types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`AppLockConfig`] | Persisted policy: enabled flag + re-lock timeout |
//! | [`AppLockState`] | The single source of truth for "may content be shown" |
//! | [`AppLockError`] | Closed taxonomy of authentication failures |
//! | [`AppLockResult`] | Outcome of one authentication attempt |
//! | [`StateChangedPayload`] | Serializable state snapshot for IPC/UI broadcast |

mod error;
mod payload;
mod traits;
mod types;

pub use error::{AppLockError, AppLockResult};
pub use payload::StateChangedPayload;
pub use traits::{Authenticator, AvailabilityChecker, ConfigRepository, LockLifecycleHooks};
pub use types::{AppLockConfig, AppLockState, UnavailableReason, DEFAULT_TIMEOUT_MILLIS};
