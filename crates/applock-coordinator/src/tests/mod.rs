//! Coordinator tests.
//!
//! Organized by concern:
//!
//! - `transitions.rs` - ensure_unlocked / authenticate state transitions
//! - `lifecycle.rs`   - foreground/background/screen-off hooks and the re-lock timeout
//! - `settings.rs`    - settings changes, availability refresh, lock_now, request_enable
//! - `concurrency.rs` - single-flight gate, stale results, designated-thread assertion
//!
//! Every test drives a real coordinator over hand-written fakes and a
//! counter clock; nothing here touches a platform.


use crate::AppLockCoordinator;
use applock_core::{
    AppLockConfig, AppLockResult, AppLockState, Authenticator, AvailabilityChecker,
    ConfigRepository, UnavailableReason,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// In-memory config repository.
pub(crate) struct FakeConfigRepository {
    config: Mutex<AppLockConfig>,
}

impl FakeConfigRepository {
    fn new(config: AppLockConfig) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }
}

impl ConfigRepository for FakeConfigRepository {
    fn get_config(&self) -> AppLockConfig {
        self.config.lock().unwrap().clone()
    }

    fn set_config(&self, config: AppLockConfig) {
        *self.config.lock().unwrap() = config;
    }
}

/// Availability checker with a switchable answer.
pub(crate) struct FakeAvailability {
    available: AtomicBool,
    reason: Mutex<UnavailableReason>,
}

impl FakeAvailability {
    fn new(available: bool, reason: UnavailableReason) -> Self {
        Self {
            available: AtomicBool::new(available),
            reason: Mutex::new(reason),
        }
    }

    pub(crate) fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub(crate) fn set_reason(&self, reason: UnavailableReason) {
        *self.reason.lock().unwrap() = reason;
    }
}

impl AvailabilityChecker for FakeAvailability {
    fn is_authentication_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn unavailable_reason(&self) -> UnavailableReason {
        *self.reason.lock().unwrap()
    }
}

/// Authenticator that resolves immediately with a fixed outcome and
/// counts how many ceremonies actually ran.
pub(crate) struct FakeAuthenticator {
    result: AppLockResult,
    calls: AtomicU64,
}

impl FakeAuthenticator {
    pub(crate) fn succeeding() -> Self {
        Self {
            result: Ok(()),
            calls: AtomicU64::new(0),
        }
    }

    pub(crate) fn failing(error: applock_core::AppLockError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicU64::new(0),
        }
    }

    pub(crate) fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Authenticator for FakeAuthenticator {
    async fn authenticate(&self) -> AppLockResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Authenticator that stays pending until the test completes it,
/// simulating a prompt waiting for the user.
pub(crate) struct SuspendingAuthenticator {
    release: Notify,
    outcome: Mutex<Option<AppLockResult>>,
}

impl SuspendingAuthenticator {
    pub(crate) fn new() -> Self {
        Self {
            release: Notify::new(),
            outcome: Mutex::new(None),
        }
    }

    pub(crate) fn complete(&self, result: AppLockResult) {
        *self.outcome.lock().unwrap() = Some(result);
        self.release.notify_one();
    }
}

impl Authenticator for SuspendingAuthenticator {
    async fn authenticate(&self) -> AppLockResult {
        loop {
            if let Some(result) = self.outcome.lock().unwrap().take() {
                return result;
            }
            self.release.notified().await;
        }
    }
}

/// A coordinator wired to fakes and a counter clock.
pub(crate) struct TestCoordinator {
    pub(crate) coordinator: AppLockCoordinator,
    pub(crate) repository: Arc<FakeConfigRepository>,
    pub(crate) availability: Arc<FakeAvailability>,
    now: Arc<AtomicU64>,
}

impl TestCoordinator {
    pub(crate) fn build(
        config: AppLockConfig,
        available: bool,
        reason: UnavailableReason,
    ) -> Self {
        let repository = Arc::new(FakeConfigRepository::new(config));
        let availability = Arc::new(FakeAvailability::new(available, reason));
        let now = Arc::new(AtomicU64::new(0));

        let clock_now = now.clone();
        let coordinator = AppLockCoordinator::with_clock(
            repository.clone(),
            availability.clone(),
            Box::new(move || clock_now.load(Ordering::SeqCst)),
        );

        Self {
            coordinator,
            repository,
            availability,
            now,
        }
    }

    /// Enabled, available, default timeout.
    pub(crate) fn enabled() -> Self {
        Self::build(
            AppLockConfig::enabled(),
            true,
            UnavailableReason::NoHardware,
        )
    }

    pub(crate) fn enabled_with_timeout(timeout_millis: u64) -> Self {
        Self::build(
            AppLockConfig {
                is_enabled: true,
                timeout_millis,
            },
            true,
            UnavailableReason::NoHardware,
        )
    }

    pub(crate) fn disabled() -> Self {
        Self::build(
            AppLockConfig::default(),
            true,
            UnavailableReason::NoHardware,
        )
    }

    pub(crate) fn unavailable(reason: UnavailableReason) -> Self {
        Self::build(AppLockConfig::enabled(), false, reason)
    }

    pub(crate) fn disabled_and_unavailable() -> Self {
        Self::build(AppLockConfig::default(), false, UnavailableReason::NoHardware)
    }

    pub(crate) fn state(&self) -> AppLockState {
        self.coordinator.current_state()
    }

    pub(crate) fn set_clock(&self, millis: u64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    /// Run a full successful unlock: ensure + authenticate.
    pub(crate) async fn unlock(&self) {
        assert!(self.coordinator.ensure_unlocked());
        self.coordinator
            .authenticate(&FakeAuthenticator::succeeding())
            .await
            .unwrap();
        assert_eq!(
            self.state(),
            AppLockState::Unlocked {
                last_hidden_at: None
            }
        );
    }
}

/// End-to-end happy path: locked on cold start, unlocks after one
/// successful attempt, observers see the latest state.
#[tokio::test]
async fn basic_workflow() {
    let tc = TestCoordinator::enabled();
    let mut observer = tc.coordinator.state();

    assert_eq!(tc.state(), AppLockState::Locked);
    assert!(tc.coordinator.ensure_unlocked());
    assert_eq!(tc.state(), AppLockState::Unlocking { attempt_id: 0 });

    let result = tc
        .coordinator
        .authenticate(&FakeAuthenticator::succeeding())
        .await;
    assert_eq!(result, Ok(()));
    assert_eq!(
        tc.state(),
        AppLockState::Unlocked {
            last_hidden_at: None
        }
    );

    // Latest-value semantics: the observer sees the final state.
    assert!(observer.has_changed().unwrap());
    assert_eq!(
        *observer.borrow_and_update(),
        AppLockState::Unlocked {
            last_hidden_at: None
        }
    );
}
