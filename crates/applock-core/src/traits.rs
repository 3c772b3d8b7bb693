//! Seams the coordinator consumes.
//!
//! Each trait covers exactly one collaborator from the coordinator's point
//! of view; production implementations live in sibling crates and tests
//! swap in hand-written fakes.

use crate::error::AppLockResult;
use crate::types::{AppLockConfig, UnavailableReason};
use std::rc::Rc;
use std::sync::Arc;

/// Get/set of the persisted app lock policy.
///
/// Synchronous, with no failure path modeled: a persistence fault is the
/// repository's concern and must be absorbed there.
pub trait ConfigRepository: Send + Sync {
    fn get_config(&self) -> AppLockConfig;
    fn set_config(&self, config: AppLockConfig);
}

/// Answers "can authentication be performed right now", and why not.
pub trait AvailabilityChecker: Send + Sync {
    fn is_authentication_available(&self) -> bool;
    /// Valid only when [`is_authentication_available`](Self::is_authentication_available)
    /// returned `false`.
    fn unavailable_reason(&self) -> UnavailableReason;
}

/// Performs one authentication ceremony.
///
/// One instance is bound to one presentation context; the coordinator
/// never calls the same instance concurrently with itself. Dropping the
/// returned future must abort the in-flight ceremony.
#[allow(async_fn_in_trait)]
pub trait Authenticator {
    async fn authenticate(&self) -> AppLockResult;
}

/// The coordinator-side hooks the lifecycle/event adapter drives.
///
/// Invoked by the adapter on OS-level transitions, never by the UI.
pub trait LockLifecycleHooks {
    fn on_app_foregrounded(&self);
    fn on_app_backgrounded(&self);
    fn on_screen_off(&self);
}

impl<T: LockLifecycleHooks + ?Sized> LockLifecycleHooks for Arc<T> {
    fn on_app_foregrounded(&self) {
        (**self).on_app_foregrounded();
    }

    fn on_app_backgrounded(&self) {
        (**self).on_app_backgrounded();
    }

    fn on_screen_off(&self) {
        (**self).on_screen_off();
    }
}

impl<T: LockLifecycleHooks + ?Sized> LockLifecycleHooks for Rc<T> {
    fn on_app_foregrounded(&self) {
        (**self).on_app_foregrounded();
    }

    fn on_app_backgrounded(&self) {
        (**self).on_app_backgrounded();
    }

    fn on_screen_off(&self) {
        (**self).on_screen_off();
    }
}
