//! # Ceremony Client
//!
//! This crate defines a [`Client`] type that drives passkey ceremonies end
//! to end against a relying party's HTTP endpoints: it requests ceremony
//! options from a begin endpoint, hands them to the platform's
//! [`CredentialsContainer`], and submits the credential or assertion the
//! platform produced to a complete endpoint. Binary credential fields cross
//! the JSON boundary base64url-encoded as [`ceremony_types::Bytes`].
//!
//! The crate performs no cryptographic operations and holds no state. The
//! platform capability, the page-level surfaces and, optionally, the HTTP
//! transport are injected, which keeps both flows deterministic under test.
//!
//! Messages the relying party addressed to the user are alerted verbatim, a
//! dismissed prompt stays silent, and every other failure is logged and
//! alerted with a fixed generic text.

use ceremony_types::{
    protocol::{BeginRegistrationRequest, BeginReply, CompleteReply, RegistrationSubmission},
    webauthn::{PublicKeyCredentialCreationOptions, PublicKeyCredentialRequestOptions},
};
use url::Url;

mod backend;
mod platform;

pub use backend::Backend;
pub use platform::{CredentialsContainer, PlatformError, UserAgent};

#[cfg(any(test, feature = "testable"))]
pub use platform::{MockCredentialsContainer, MockUserAgent};

#[cfg(test)]
mod tests;

/// Fixed text alerted when registration fails for a reason the user cannot
/// act on. Failure detail stays in the logs.
const REGISTRATION_FAILED: &str = "Erro ao registrar passkey. Tente novamente.";

/// Fixed text alerted when authentication fails for a reason the user cannot
/// act on.
const AUTHENTICATION_FAILED: &str = "Erro na autenticação com passkey. Tente novamente.";

/// Errors produced by ceremony flows.
///
/// By the time a flow returns one of these, the user has already been shown
/// whatever they were meant to see; the value is for the caller's own
/// logging or flow control. User cancellation is not an error, see
/// [`FlowOutcome::Cancelled`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// The relying party reported a failure. The message was alerted to the
    /// user verbatim.
    #[error("{0}")]
    Server(String),

    /// The platform authenticator failed for a reason other than the user
    /// dismissing the prompt.
    #[error("platform authenticator failure")]
    Platform(#[from] PlatformError),

    /// The relying party could not be reached.
    #[error("request to the relying party failed")]
    Fetch,

    /// The relying party's reply could not be decoded. Covers malformed
    /// JSON as well as binary fields that are not valid base64url.
    #[error("malformed reply from the relying party")]
    Syntax,
}

/// The terminal state of a ceremony flow that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The ceremony completed and the current page was reloaded.
    Reload,

    /// The ceremony completed and the user agent was sent to this target.
    Redirect(String),

    /// The user dismissed the platform prompt. Nothing was submitted and
    /// nothing was shown; cancelling is not an error.
    Cancelled,
}

/// A `Client` drives passkey ceremonies against a relying party. Users of
/// this struct supply a [`CredentialsContainer`] and a [`UserAgent`], and
/// may swap the HTTP transport for any [`Backend`].
///
/// Each flow is one linear asynchronous chain; the only long suspension
/// point is the platform prompt itself. Flows take `&self` and share no
/// mutable state, so one client can serve unrelated user actions.
pub struct Client<C, U, B> {
    container: C,
    user_agent: U,
    backend: B,
}

impl<C, U> Client<C, U, reqwest::Client>
where
    C: CredentialsContainer + Sync,
    U: UserAgent + Sync,
{
    /// Create a `Client` that reaches the relying party through a default
    /// reqwest transport.
    pub fn new(container: C, user_agent: U) -> Self {
        Self::new_with_backend(container, user_agent, reqwest::Client::new())
    }
}

impl<C, U, B> Client<C, U, B>
where
    C: CredentialsContainer + Sync,
    U: UserAgent + Sync,
    B: Backend + Sync,
{
    /// Create a `Client` with a custom transport to the relying party.
    pub fn new_with_backend(container: C, user_agent: U, backend: B) -> Self {
        Self {
            container,
            user_agent,
            backend,
        }
    }

    /// Read access to the client's [`CredentialsContainer`].
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Register a passkey under the given label.
    ///
    /// Sends `name` to `begin_url`, runs the platform creation ceremony on
    /// the options the relying party answered with, and submits the created
    /// credential to `complete_url`. On success the page is reloaded, the
    /// new credential now being active.
    pub async fn register(
        &self,
        begin_url: &Url,
        complete_url: &Url,
        name: &str,
    ) -> Result<FlowOutcome, FlowError> {
        let result = self.run_registration(begin_url, complete_url, name).await;
        self.surface("registration", REGISTRATION_FAILED, result)
    }

    async fn run_registration(
        &self,
        begin_url: &Url,
        complete_url: &Url,
        name: &str,
    ) -> Result<FlowOutcome, FlowError> {
        let begin = BeginRegistrationRequest {
            name: name.to_owned(),
        };
        // SAFETY: serializing an owned request struct cannot fail.
        let body = serde_json::to_value(&begin).unwrap();
        let reply = self.backend.exchange(begin_url, Some(&body)).await?;

        let options: PublicKeyCredentialCreationOptions = match parse_reply(reply)? {
            BeginReply::Error(refusal) => return Err(FlowError::Server(refusal.error)),
            BeginReply::Options(options) => options,
        };

        let credential = match self.container.create(options).await {
            Ok(credential) => credential,
            Err(err) if err.is_cancellation() => return Ok(FlowOutcome::Cancelled),
            Err(err) => return Err(FlowError::Platform(err)),
        };

        let submission = RegistrationSubmission {
            credential,
            name: name.to_owned(),
        };
        // SAFETY: serializing our own submission types cannot fail.
        let body = serde_json::to_value(&submission).unwrap();
        let reply = self.backend.exchange(complete_url, Some(&body)).await?;

        let completion: CompleteReply = parse_reply(reply)?;
        if let Some(error) = completion.error {
            return Err(FlowError::Server(error));
        }

        self.user_agent.reload();
        Ok(FlowOutcome::Reload)
    }

    /// Authenticate with an existing passkey.
    ///
    /// Authentication is not tied to a credential label at this layer; the
    /// relying party decides, through the allow-list in its options, which
    /// credentials may answer. On success the user agent is sent to the
    /// target the relying party named, or the page is reloaded when it
    /// named none.
    pub async fn authenticate(
        &self,
        begin_url: &Url,
        complete_url: &Url,
    ) -> Result<FlowOutcome, FlowError> {
        let result = self.run_authentication(begin_url, complete_url).await;
        self.surface("authentication", AUTHENTICATION_FAILED, result)
    }

    async fn run_authentication(
        &self,
        begin_url: &Url,
        complete_url: &Url,
    ) -> Result<FlowOutcome, FlowError> {
        let reply = self.backend.exchange(begin_url, None).await?;

        let options: PublicKeyCredentialRequestOptions = match parse_reply(reply)? {
            BeginReply::Error(refusal) => return Err(FlowError::Server(refusal.error)),
            BeginReply::Options(options) => options,
        };

        let assertion = match self.container.get(options).await {
            Ok(assertion) => assertion,
            Err(err) if err.is_cancellation() => return Ok(FlowOutcome::Cancelled),
            Err(err) => return Err(FlowError::Platform(err)),
        };

        // SAFETY: serializing our own submission types cannot fail.
        let body = serde_json::to_value(&assertion).unwrap();
        let reply = self.backend.exchange(complete_url, Some(&body)).await?;

        let completion: CompleteReply = parse_reply(reply)?;
        if let Some(error) = completion.error {
            return Err(FlowError::Server(error));
        }
        if let Some(target) = completion.redirect {
            self.user_agent.navigate(&target);
            return Ok(FlowOutcome::Redirect(target));
        }

        self.user_agent.reload();
        Ok(FlowOutcome::Reload)
    }

    /// Apply the user-facing side of a finished flow: relying-party messages
    /// verbatim, silence for cancellations, a fixed generic text for
    /// everything else. The result passes through untouched.
    fn surface(
        &self,
        operation: &str,
        fallback: &str,
        result: Result<FlowOutcome, FlowError>,
    ) -> Result<FlowOutcome, FlowError> {
        match &result {
            Ok(_) => {}
            Err(FlowError::Server(message)) => self.user_agent.alert(message),
            Err(err) => {
                log::error!("passkey {operation} error: {err:?}");
                self.user_agent.alert(fallback);
            }
        }
        result
    }
}

/// Decode a relying party reply, demoting undecodable ones to
/// [`FlowError::Syntax`].
fn parse_reply<T: serde::de::DeserializeOwned>(reply: serde_json::Value) -> Result<T, FlowError> {
    serde_json::from_value(reply).map_err(|err| {
        log::error!("unexpected relying party reply: {err}");
        FlowError::Syntax
    })
}
