//! Lifecycle event bridge for the app lock subsystem.
//!
//! The OS integration layer owns a [`LifecycleHandle`] and pushes
//! [`LifecycleEvent`]s from wherever platform callbacks fire; the
//! [`LifecycleBridge`] forwards them, in order, to the coordinator's
//! [`LockLifecycleHooks`] on the coordinator's own thread. The channel is
//! the thread boundary: handles are clone-able and send-safe, the
//! forwarding task is local.

use applock_core::LockLifecycleHooks;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// An OS-level transition relevant to the lock gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The app (re-)entered the foreground.
    AppForegrounded,
    /// The app left the foreground.
    AppBackgrounded,
    /// The device screen turned off.
    ScreenOff,
}

/// The OS-facing side of the bridge.
///
/// Clone one per callback site. Sending never blocks and never fails
/// loudly: once the bridge is gone the event is dropped, which is the
/// right behavior during teardown.
#[derive(Debug, Clone)]
pub struct LifecycleHandle {
    sender: UnboundedSender<LifecycleEvent>,
}

impl LifecycleHandle {
    pub fn send(&self, event: LifecycleEvent) {
        if self.sender.send(event).is_err() {
            debug!(?event, "Dropping lifecycle event, no bridge attached");
        }
    }

    pub fn app_foregrounded(&self) {
        self.send(LifecycleEvent::AppForegrounded);
    }

    pub fn app_backgrounded(&self) {
        self.send(LifecycleEvent::AppBackgrounded);
    }

    pub fn screen_off(&self) {
        self.send(LifecycleEvent::ScreenOff);
    }
}

/// Create a handle/receiver pair. The receiver is handed to
/// [`LifecycleBridge::register`].
pub fn lifecycle_channel() -> (LifecycleHandle, UnboundedReceiver<LifecycleEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (LifecycleHandle { sender }, receiver)
}

/// Forwards lifecycle events to a [`LockLifecycleHooks`] implementation.
///
/// The forwarding task is spawned with `spawn_local`, so the bridge must
/// be registered from within a `LocalSet` (or a current-thread runtime's
/// main task). That keeps the hooks on the coordinator's designated
/// thread without requiring them to be `Send`.
#[derive(Default)]
pub struct LifecycleBridge {
    task: Option<JoinHandle<()>>,
}

impl LifecycleBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start forwarding events from `receiver` into `hooks`.
    ///
    /// Registering again first tears down the previous forwarding task,
    /// so the bridge never feeds two receivers at once.
    pub fn register<H>(&mut self, mut receiver: UnboundedReceiver<LifecycleEvent>, hooks: H)
    where
        H: LockLifecycleHooks + 'static,
    {
        self.unregister();
        debug!("Lifecycle bridge registered");
        self.task = Some(tokio::task::spawn_local(async move {
            while let Some(event) = receiver.recv().await {
                trace!(?event, "Forwarding lifecycle event");
                match event {
                    LifecycleEvent::AppForegrounded => hooks.on_app_foregrounded(),
                    LifecycleEvent::AppBackgrounded => hooks.on_app_backgrounded(),
                    LifecycleEvent::ScreenOff => hooks.on_screen_off(),
                }
            }
            debug!("Lifecycle channel closed, bridge task finished");
        }));
    }

    /// Stop forwarding. Idempotent.
    pub fn unregister(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Lifecycle bridge unregistered");
        }
    }

    pub fn is_registered(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for LifecycleBridge {
    fn drop(&mut self) {
        self.unregister();
    }
}
