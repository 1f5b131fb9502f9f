//! The capabilities a ceremony needs from its host environment: the
//! platform's credential prompt and the page-level surfaces around it.

use async_trait::async_trait;
use ceremony_types::webauthn::{
    AuthenticatedPublicKeyCredential, CreatedPublicKeyCredential,
    PublicKeyCredentialCreationOptions, PublicKeyCredentialRequestOptions,
};

/// Errors reported by a [`CredentialsContainer`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// The user dismissed the prompt, the ceremony timed out, or the
    /// platform otherwise denied it. Named after the web API's
    /// `NotAllowedError`, which deliberately folds all of those together.
    #[error("the ceremony was not allowed to complete")]
    NotAllowed,

    /// No credential capability is available on this platform.
    #[error("no platform credential capability is available")]
    Unsupported,

    /// Any other platform failure, with diagnostic detail. The detail is
    /// logged, never shown to the user.
    #[error("{0}")]
    Other(String),
}

impl PlatformError {
    /// Was the error an expected user cancellation rather than a real
    /// failure? Cancellations end a flow silently.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, PlatformError::NotAllowed)
    }
}

/// Pluggable access to the platform's native credential operations, the
/// equivalent of the web's `navigator.credentials`.
///
/// Both operations put up the platform's own prompt and may suspend for as
/// long as the user takes to answer it; no timeout is imposed here.
/// Implementations on platforms that report a dismissed prompt by yielding
/// no credential at all should map that case to
/// [`PlatformError::NotAllowed`].
#[cfg_attr(any(test, feature = "testable"), mockall::automock)]
#[async_trait]
pub trait CredentialsContainer {
    /// Create a credential through the platform ceremony prompt.
    async fn create(
        &self,
        options: PublicKeyCredentialCreationOptions,
    ) -> Result<CreatedPublicKeyCredential, PlatformError>;

    /// Produce an assertion for an existing credential.
    async fn get(
        &self,
        options: PublicKeyCredentialRequestOptions,
    ) -> Result<AuthenticatedPublicKeyCredential, PlatformError>;
}

/// The page-level surfaces a flow touches: blocking alerts and navigation.
#[cfg_attr(any(test, feature = "testable"), mockall::automock)]
pub trait UserAgent {
    /// Show a blocking message to the user.
    fn alert(&self, message: &str);

    /// Reload the current page.
    fn reload(&self);

    /// Send the user agent to the given target.
    fn navigate(&self, target: &str);
}
