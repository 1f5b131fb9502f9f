//! Envelope types for the begin/complete HTTP exchanges with a relying
//! party.
//!
//! Each ceremony is two POSTs: a begin request answered with either a
//! failure or ceremony options, and a complete request carrying the
//! credential the platform produced, answered with a failure, an optional
//! navigation target, or a plain success.

use serde::{Deserialize, Serialize};

use crate::webauthn::CreatedPublicKeyCredential;

/// Body of a begin-registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeginRegistrationRequest {
    /// The human-readable label the new credential will be stored under.
    pub name: String,
}

/// A failure reported by the relying party. The message is meant for the
/// user, verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorReply {
    /// The user-facing failure message.
    pub error: String,
}

/// Reply to a begin request: a refusal, or the options for the ceremony.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BeginReply<T> {
    /// The relying party refused to start the ceremony.
    Error(ErrorReply),

    /// The ceremony options to hand to the platform authenticator.
    Options(T),
}

/// Body of a complete-registration request: the created credential plus the
/// label it was requested under. The credential's fields flatten to the top
/// level, the way relying parties expect the web API's JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationSubmission {
    /// The credential produced by the platform authenticator.
    #[serde(flatten)]
    pub credential: CreatedPublicKeyCredential,

    /// The label that was sent to the begin endpoint.
    pub name: String,
}

/// Reply to a complete request. A reply that carries neither member is a
/// plain success.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteReply {
    /// Failure message to surface verbatim, when the relying party rejected
    /// the ceremony.
    #[serde(default)]
    pub error: Option<String>,

    /// Navigation target the relying party wants the user agent sent to
    /// after a successful authentication.
    #[serde(default)]
    pub redirect: Option<String>,
}
