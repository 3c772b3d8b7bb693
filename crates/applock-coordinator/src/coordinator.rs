//! The lock coordinator state machine.

use crate::single_flight::SingleFlightGuard;
use applock_core::{
    AppLockConfig, AppLockError, AppLockResult, AppLockState, Authenticator, AvailabilityChecker,
    ConfigRepository, LockLifecycleHooks, StateChangedPayload,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::Instant;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Injectable monotonic clock, in milliseconds. Immune to wall-clock
/// adjustments; swapped for a counter in tests.
pub type MonotonicClock = Box<dyn Fn() -> u64 + Send + Sync>;

/// The process-wide lock coordinator.
///
/// Owns the authoritative [`AppLockState`] and is the only component that
/// mutates it. Holds no persisted state of its own: a process restart
/// recomputes the initial state from current config and availability,
/// which for an enabled and available configuration means re-entering
/// `Locked`.
///
/// All state-mutating operations must run on the thread the coordinator
/// was constructed on (host it on a current-thread runtime or
/// `LocalSet`); calling one from another thread is a programmer error and
/// panics. The single-flight gate and the attempt-id token make the two
/// suspending operations ([`authenticate`](Self::authenticate),
/// [`request_enable`](Self::request_enable)) safe against events that
/// fire while an authentication is awaited.
pub struct AppLockCoordinator {
    config_repository: Arc<dyn ConfigRepository>,
    availability: Arc<dyn AvailabilityChecker>,
    clock: MonotonicClock,
    state: watch::Sender<AppLockState>,
    next_attempt_id: AtomicU64,
    authenticating: AtomicBool,
    designated_thread: ThreadId,
}

impl AppLockCoordinator {
    /// Coordinator with the default monotonic clock.
    pub fn new(
        config_repository: Arc<dyn ConfigRepository>,
        availability: Arc<dyn AvailabilityChecker>,
    ) -> Self {
        let start = Instant::now();
        Self::with_clock(
            config_repository,
            availability,
            Box::new(move || start.elapsed().as_millis() as u64),
        )
    }

    /// Coordinator with an injected clock, for deterministic tests.
    pub fn with_clock(
        config_repository: Arc<dyn ConfigRepository>,
        availability: Arc<dyn AvailabilityChecker>,
        clock: MonotonicClock,
    ) -> Self {
        let initial = Self::initial_state(&config_repository.get_config(), availability.as_ref());
        debug!(state = ?initial, "App lock coordinator created");

        Self {
            config_repository,
            availability,
            clock,
            state: watch::Sender::new(initial),
            next_attempt_id: AtomicU64::new(0),
            authenticating: AtomicBool::new(false),
            designated_thread: thread::current().id(),
        }
    }

    /// Cold-start state from current config and availability.
    fn initial_state(
        config: &AppLockConfig,
        availability: &dyn AvailabilityChecker,
    ) -> AppLockState {
        if !config.is_enabled {
            AppLockState::Disabled
        } else if !availability.is_authentication_available() {
            AppLockState::Unavailable {
                reason: availability.unavailable_reason(),
            }
        } else {
            AppLockState::Locked
        }
    }

    /// Subscribe to state changes. Readers always see the latest value;
    /// intermediate values are not buffered.
    pub fn state(&self) -> watch::Receiver<AppLockState> {
        self.state.subscribe()
    }

    /// The state right now.
    pub fn current_state(&self) -> AppLockState {
        self.state.borrow().clone()
    }

    /// Serializable snapshot of the current state, for IPC/UI broadcast.
    pub fn state_payload(&self) -> StateChangedPayload {
        StateChangedPayload::from(&*self.state.borrow())
    }

    /// Read-through to the persisted policy.
    pub fn config(&self) -> AppLockConfig {
        self.config_repository.get_config()
    }

    /// Whether the feature is turned on.
    pub fn is_enabled(&self) -> bool {
        self.config_repository.get_config().is_enabled
    }

    /// Read-through to the availability checker.
    pub fn is_authentication_available(&self) -> bool {
        self.availability.is_authentication_available()
    }

    /// Called by the UI when it wants to show gated content.
    ///
    /// Returns `true` immediately when content may be shown (`Disabled`,
    /// `Unlocked`). From `Locked` or `Failed`, mints a fresh attempt id,
    /// enters `Unlocking`, and returns `true`; the caller must now run
    /// [`authenticate`](Self::authenticate). Returns `false` while an
    /// attempt is already in flight (do not show a duplicate prompt) and
    /// while `Unavailable` (show guidance instead of a prompt).
    pub fn ensure_unlocked(&self) -> bool {
        self.assert_designated_thread();
        match self.current_state() {
            AppLockState::Disabled | AppLockState::Unlocked { .. } => true,
            AppLockState::Unlocking { .. } | AppLockState::Unavailable { .. } => false,
            AppLockState::Locked | AppLockState::Failed { .. } => {
                let attempt_id = self.next_attempt_id.fetch_add(1, Ordering::SeqCst);
                self.set_state(AppLockState::Unlocking { attempt_id });
                true
            }
        }
    }

    /// Run one authentication attempt while in `Unlocking`.
    ///
    /// Single-flight: a concurrent call returns
    /// `UnableToStart("authentication already in progress")` without
    /// touching state. The result is applied to state only if the state
    /// is still `Unlocking` with the attempt id captured at dispatch; a
    /// stale completion is discarded. The raw result is always returned
    /// to the caller either way.
    pub async fn authenticate<A: Authenticator>(&self, authenticator: &A) -> AppLockResult {
        self.assert_designated_thread();
        let Some(_flight) = SingleFlightGuard::acquire(&self.authenticating) else {
            return Err(AppLockError::unable_to_start(
                "authentication already in progress",
            ));
        };
        let Some(attempt_id) = self.current_state().attempt_id() else {
            return Err(AppLockError::unable_to_start("not in unlocking state"));
        };

        let result = authenticator.authenticate().await;

        self.assert_designated_thread();
        if self.current_state().attempt_id() == Some(attempt_id) {
            self.apply_result(&result);
        } else {
            warn!(attempt_id, "Discarding stale authentication result");
        }
        result
    }

    /// Authenticate once and, on success, turn the feature on.
    ///
    /// Requires availability (`Failure(NotAvailable)` otherwise) and
    /// shares the single-flight gate with
    /// [`authenticate`](Self::authenticate). On failure the feature stays
    /// off and the state is untouched.
    pub async fn request_enable<A: Authenticator>(&self, authenticator: &A) -> AppLockResult {
        self.assert_designated_thread();
        if !self.availability.is_authentication_available() {
            return Err(AppLockError::NotAvailable);
        }
        let Some(_flight) = SingleFlightGuard::acquire(&self.authenticating) else {
            return Err(AppLockError::unable_to_start(
                "authentication already in progress",
            ));
        };

        let result = authenticator.authenticate().await;

        self.assert_designated_thread();
        if result.is_ok() {
            let mut config = self.config_repository.get_config();
            config.is_enabled = true;
            self.config_repository.set_config(config);
            self.set_state(AppLockState::Unlocked {
                last_hidden_at: None,
            });
            info!("App lock enabled");
        }
        result
    }

    /// Explicit "lock now". Idempotent; forces `Locked` whenever the
    /// feature is enabled and available, regardless of current state.
    pub fn lock_now(&self) {
        self.assert_designated_thread();
        if self.config_repository.get_config().is_enabled
            && self.availability.is_authentication_available()
        {
            info!("App lock engaged on request");
            self.set_state(AppLockState::Locked);
        }
    }

    /// Apply a new policy.
    ///
    /// Enabling while authentication is unavailable is rejected outright
    /// (neither state nor the persisted config change) so the user cannot
    /// be trapped behind an unsatisfiable gate. Toggling only the timeout
    /// does not force a re-lock.
    pub fn on_settings_changed(&self, new_config: AppLockConfig) {
        self.assert_designated_thread();
        if new_config.is_enabled && !self.availability.is_authentication_available() {
            warn!("Rejected enabling app lock while authentication is unavailable");
            return;
        }

        self.config_repository.set_config(new_config.clone());

        if !new_config.is_enabled {
            self.set_state(AppLockState::Disabled);
            return;
        }
        match self.current_state() {
            AppLockState::Disabled | AppLockState::Unavailable { .. } => {
                self.set_state(AppLockState::Locked);
            }
            AppLockState::Unlocking { .. } | AppLockState::Failed { .. } => {
                // Normally unreachable while the lock overlay covers the
                // settings screen; preserved rather than asserted.
                debug!("Settings changed during a transient state, leaving state as-is");
            }
            AppLockState::Locked | AppLockState::Unlocked { .. } => {}
        }
    }

    /// Re-probe availability after the user returns from a system
    /// settings flow (e.g. enrolling a fingerprint). Only acts while the
    /// state is `Unavailable`.
    pub fn refresh_availability(&self) {
        self.assert_designated_thread();
        if !matches!(self.current_state(), AppLockState::Unavailable { .. }) {
            return;
        }

        if !self.config_repository.get_config().is_enabled {
            self.set_state(AppLockState::Disabled);
        } else if self.availability.is_authentication_available() {
            info!("Authentication became available");
            self.set_state(AppLockState::Locked);
        } else {
            self.set_state(AppLockState::Unavailable {
                reason: self.availability.unavailable_reason(),
            });
        }
    }

    /// Resolve a completed attempt into state.
    fn apply_result(&self, result: &AppLockResult) {
        match result {
            Ok(()) => {
                info!("App lock unlocked");
                self.set_state(AppLockState::Unlocked {
                    last_hidden_at: None,
                });
            }
            Err(error) if error.is_interruption() => {
                // External teardown, not a user-visible failure.
                debug!("Authentication interrupted, returning to locked");
                self.set_state(AppLockState::Locked);
            }
            Err(error) => {
                warn!(%error, "Authentication failed");
                self.set_state(AppLockState::Failed {
                    error: error.clone(),
                });
            }
        }
    }

    fn set_state(&self, new_state: AppLockState) {
        self.state.send_if_modified(|state| {
            if *state == new_state {
                return false;
            }
            debug!(old_state = ?state, new_state = ?new_state, "App lock state transition");
            *state = new_state;
            true
        });
    }

    fn assert_designated_thread(&self) {
        assert_eq!(
            thread::current().id(),
            self.designated_thread,
            "AppLockCoordinator used off the thread it was constructed on"
        );
    }
}

impl LockLifecycleHooks for AppLockCoordinator {
    /// Re-reads config and availability, applies the re-lock timeout, and
    /// resolves stale `Disabled`/`Unavailable` states. `Locked`,
    /// `Unlocking`, and `Failed` are left for the UI to resolve through
    /// [`ensure_unlocked`](AppLockCoordinator::ensure_unlocked).
    fn on_app_foregrounded(&self) {
        self.assert_designated_thread();
        let config = self.config_repository.get_config();
        if !config.is_enabled {
            self.set_state(AppLockState::Disabled);
            return;
        }
        if !self.availability.is_authentication_available() {
            self.set_state(AppLockState::Unavailable {
                reason: self.availability.unavailable_reason(),
            });
            return;
        }

        match self.current_state() {
            AppLockState::Unlocked {
                last_hidden_at: Some(hidden_at),
            } => {
                let elapsed = (self.clock)().saturating_sub(hidden_at);
                if elapsed >= config.timeout_millis {
                    info!(elapsed, timeout = config.timeout_millis, "Re-lock timeout expired");
                    self.set_state(AppLockState::Locked);
                } else {
                    self.set_state(AppLockState::Unlocked {
                        last_hidden_at: None,
                    });
                }
            }
            // Policy now says enabled and available; re-entry requires
            // fresh authentication.
            AppLockState::Disabled | AppLockState::Unavailable { .. } => {
                self.set_state(AppLockState::Locked);
            }
            AppLockState::Unlocked {
                last_hidden_at: None,
            }
            | AppLockState::Locked
            | AppLockState::Unlocking { .. }
            | AppLockState::Failed { .. } => {}
        }
    }

    /// Starts the re-lock countdown when `Unlocked`; abandons an
    /// in-flight or just-failed attempt so the next foreground gets a
    /// clean retry.
    fn on_app_backgrounded(&self) {
        self.assert_designated_thread();
        match self.current_state() {
            AppLockState::Unlocked { .. } => {
                self.set_state(AppLockState::Unlocked {
                    last_hidden_at: Some((self.clock)()),
                });
            }
            AppLockState::Unlocking { .. } | AppLockState::Failed { .. } => {
                self.set_state(AppLockState::Locked);
            }
            AppLockState::Disabled
            | AppLockState::Unavailable { .. }
            | AppLockState::Locked => {}
        }
    }

    /// Screen-off is a stronger signal than the backgrounding timeout:
    /// locks immediately from `Unlocked` or `Unlocking`.
    fn on_screen_off(&self) {
        self.assert_designated_thread();
        if !self.config_repository.get_config().is_enabled
            || !self.availability.is_authentication_available()
        {
            return;
        }
        if matches!(
            self.current_state(),
            AppLockState::Unlocked { .. } | AppLockState::Unlocking { .. }
        ) {
            info!("Screen off, locking");
            self.set_state(AppLockState::Locked);
        }
    }
}
