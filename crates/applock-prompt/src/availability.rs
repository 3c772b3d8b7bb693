//! The default [`AvailabilityChecker`] built over a capability probe.

use crate::methods::{allowed_auth_methods, AuthMethods};
use applock_core::{AvailabilityChecker, UnavailableReason};

/// What the platform says about a method mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// At least one allowed method can succeed right now.
    Available,
    /// No authentication hardware for any allowed method.
    NoHardware,
    /// Hardware exists but cannot be used right now.
    HardwareUnavailable,
    /// Nothing is enrolled for the allowed methods.
    NoneEnrolled,
    /// The platform version cannot evaluate this mask.
    Unsupported,
    /// The platform could not determine the status.
    Unknown,
}

/// Seam over the platform's capability check (vendor internals stay on
/// the other side of this trait).
pub trait CapabilityProbe: Send + Sync {
    fn can_authenticate(&self, methods: AuthMethods) -> CapabilityStatus;
}

/// An [`AvailabilityChecker`] that probes the same method mask the prompt
/// will be configured with.
#[derive(Debug)]
pub struct DeviceAvailability<P> {
    probe: P,
    methods: AuthMethods,
}

impl<P: CapabilityProbe> DeviceAvailability<P> {
    /// Checker probing the mask allowed on `api_level`.
    pub fn new(probe: P, api_level: u32) -> Self {
        Self {
            probe,
            methods: allowed_auth_methods(api_level),
        }
    }

    /// The mask this checker probes; hand the same value to the prompt.
    pub fn methods(&self) -> AuthMethods {
        self.methods
    }
}

impl<P: CapabilityProbe + Send + Sync> AvailabilityChecker for DeviceAvailability<P> {
    fn is_authentication_available(&self) -> bool {
        matches!(
            self.probe.can_authenticate(self.methods),
            CapabilityStatus::Available
        )
    }

    fn unavailable_reason(&self) -> UnavailableReason {
        match self.probe.can_authenticate(self.methods) {
            CapabilityStatus::NoHardware | CapabilityStatus::Unsupported => {
                UnavailableReason::NoHardware
            }
            CapabilityStatus::HardwareUnavailable => UnavailableReason::TemporarilyUnavailable,
            CapabilityStatus::NoneEnrolled => UnavailableReason::NotEnrolled,
            CapabilityStatus::Available | CapabilityStatus::Unknown => UnavailableReason::Unknown,
        }
    }
}
