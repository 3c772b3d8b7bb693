//! # Applock Coordinator
//!
//! The lock coordinator: a single in-memory state machine that owns the
//! authoritative "may the app show content" state and mediates every
//! transition caused by lifecycle events, authentication attempts, and
//! settings changes.
//!
//! One coordinator exists per process, constructed explicitly and
//! injected into the host's composition root. State is observed through a
//! `tokio::sync::watch` channel (latest-value semantics); all mutations
//! happen on the thread the coordinator was constructed on, which a
//! runtime assertion enforces.
//!
//! ## Key operations
//!
//! | Operation | Description |
//! |-----------|-------------|
//! | [`AppLockCoordinator::ensure_unlocked`] | UI entry point: may I show content, or should I prompt? |
//! | [`AppLockCoordinator::authenticate`] | Run one authentication attempt while in `Unlocking` |
//! | [`AppLockCoordinator::request_enable`] | Authenticate once, then turn the feature on |
//! | [`AppLockCoordinator::lock_now`] | Explicit user "lock now" |
//! | [`AppLockCoordinator::on_settings_changed`] | Apply a new policy |
//! | [`AppLockCoordinator::refresh_availability`] | Re-probe after a trip to system settings |

mod coordinator;
mod single_flight;

#[cfg(test)]
mod tests;

pub use coordinator::{AppLockCoordinator, MonotonicClock};
