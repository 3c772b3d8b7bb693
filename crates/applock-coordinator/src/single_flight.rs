//! Single-flight gate over authentication attempts.

use std::sync::atomic::{AtomicBool, Ordering};

/// RAII guard over an "authentication in progress" flag.
///
/// The flag must be released on every exit path, including cancellation
/// by future drop, so the release lives in `Drop` rather than at the
/// call sites.
pub(crate) struct SingleFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SingleFlightGuard<'a> {
    /// Claim the gate. `None` when another attempt already holds it.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for SingleFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
