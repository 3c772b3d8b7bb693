//! # Applock Prompt
//!
//! The authenticator-side platform bridge: decides which authentication
//! methods the platform prompt may offer, probes whether any of them can
//! currently succeed, and maps every platform error code into the closed
//! [`AppLockError`](applock_core::AppLockError) taxonomy.
//!
//! Availability and the prompt share one method mask by construction:
//! both [`DeviceAvailability`] and [`PromptAuthenticator`] derive it from
//! [`allowed_auth_methods`], so "available" and "can actually succeed"
//! never diverge.
//!
//! ## Key types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`AuthMethods`] | Bit set of authentication method classes |
//! | [`PromptErrorCode`] | Closed set of platform prompt error codes |
//! | [`PromptBackend`] | Seam over the platform prompt ceremony |
//! | [`PromptAuthenticator`] | `Authenticator` built over a backend |
//! | [`CapabilityProbe`] | Seam over the platform capability check |
//! | [`DeviceAvailability`] | `AvailabilityChecker` built over a probe |

mod authenticator;
mod availability;
mod codes;
mod methods;

pub use authenticator::{PromptAuthenticator, PromptBackend, PromptRequest};
pub use availability::{CapabilityProbe, CapabilityStatus, DeviceAvailability};
pub use codes::{PromptError, PromptErrorCode};
pub use methods::{allowed_auth_methods, AuthMethods, STRONG_CREDENTIAL_MIN_API};
