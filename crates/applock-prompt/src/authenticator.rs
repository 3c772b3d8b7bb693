//! The default [`Authenticator`] built over a platform prompt backend.

use crate::codes::PromptError;
use crate::methods::{allowed_auth_methods, AuthMethods};
use applock_core::{AppLockResult, Authenticator};
use tracing::debug;

/// What the platform prompt should display and accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub title: String,
    pub subtitle: Option<String>,
    /// The method classes the prompt may offer. Always derived from
    /// [`allowed_auth_methods`] so it matches the availability probe.
    pub allowed_methods: AuthMethods,
}

/// Seam over the platform's prompt ceremony.
///
/// Implementations attach to one UI host. Dropping the future returned by
/// [`present`](Self::present) must abort the in-flight ceremony; a failure
/// to even start the prompt must be reported as a [`PromptError`] (use
/// [`PromptError::start_failed`]), never allowed to escape as a panic.
#[allow(async_fn_in_trait)]
pub trait PromptBackend {
    async fn present(&self, request: &PromptRequest) -> Result<(), PromptError>;
}

/// An [`Authenticator`] that runs one prompt ceremony per call and maps
/// every backend failure through the fixed error table.
#[derive(Debug)]
pub struct PromptAuthenticator<B> {
    backend: B,
    request: PromptRequest,
}

impl<B: PromptBackend> PromptAuthenticator<B> {
    /// Authenticator presenting `title`/`subtitle`, offering the method
    /// classes allowed on `api_level`.
    pub fn new(
        backend: B,
        title: impl Into<String>,
        subtitle: Option<String>,
        api_level: u32,
    ) -> Self {
        Self {
            backend,
            request: PromptRequest {
                title: title.into(),
                subtitle,
                allowed_methods: allowed_auth_methods(api_level),
            },
        }
    }

    /// The request this authenticator presents.
    pub fn request(&self) -> &PromptRequest {
        &self.request
    }
}

impl<B: PromptBackend> Authenticator for PromptAuthenticator<B> {
    async fn authenticate(&self) -> AppLockResult {
        match self.backend.present(&self.request).await {
            Ok(()) => Ok(()),
            Err(err) => {
                debug!(code = ?err.code, "Prompt ceremony failed");
                Err(err.into_app_lock_error())
            }
        }
    }
}
