//! Allowed authentication method mask.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Lowest platform API level on which the strong-biometric +
/// device-credential combination is reliable. Below it the prompt must
/// fall back to weak biometric + device credential, which is functionally
/// equivalent here since no cryptographic object is bound to the
/// authentication.
pub const STRONG_CREDENTIAL_MIN_API: u32 = 30;

/// A bit set of authentication method classes the prompt may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthMethods(u32);

impl AuthMethods {
    /// Class 3 biometric (fingerprint, secure face unlock).
    pub const STRONG_BIOMETRIC: AuthMethods = AuthMethods(1 << 0);
    /// Class 2 biometric.
    pub const WEAK_BIOMETRIC: AuthMethods = AuthMethods(1 << 1);
    /// Device PIN, pattern, or password.
    pub const DEVICE_CREDENTIAL: AuthMethods = AuthMethods(1 << 2);

    /// The empty set.
    pub const fn empty() -> Self {
        AuthMethods(0)
    }

    /// True when every method in `other` is also in `self`.
    pub const fn contains(self, other: AuthMethods) -> bool {
        self.0 & other.0 == other.0
    }

    /// Raw bit representation, for handing to a platform API.
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for AuthMethods {
    type Output = AuthMethods;

    fn bitor(self, rhs: AuthMethods) -> AuthMethods {
        AuthMethods(self.0 | rhs.0)
    }
}

/// The method mask to use on the given platform API level.
///
/// This single function feeds both the availability probe and the prompt
/// configuration, so the two can never disagree about which methods count.
pub fn allowed_auth_methods(api_level: u32) -> AuthMethods {
    if api_level >= STRONG_CREDENTIAL_MIN_API {
        AuthMethods::STRONG_BIOMETRIC | AuthMethods::DEVICE_CREDENTIAL
    } else {
        AuthMethods::WEAK_BIOMETRIC | AuthMethods::DEVICE_CREDENTIAL
    }
}
