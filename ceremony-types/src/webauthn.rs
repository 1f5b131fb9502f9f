//! Types for the option and credential structures defined in [WebAuthn Level 3]
//! that a ceremony relays between relying party and platform authenticator.
//!
//! [WebAuthn Level 3]: https://w3c.github.io/webauthn

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::Bytes;

mod assertion;
mod attestation;
mod common;

// re-export types
pub use self::{assertion::*, attestation::*, common::*};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::AuthenticatorAssertionResponse {}
    impl Sealed for super::AuthenticatorAttestationResponse {}
}

/// Marker trait for response types
pub trait AuthenticatorResponse: sealed::Sealed {}

impl AuthenticatorResponse for AuthenticatorAssertionResponse {}
impl AuthenticatorResponse for AuthenticatorAttestationResponse {}

/// This is the response from a successful creation or assertion of a credential.
///
/// It is recommended to use the type aliases depending on which response you
/// are expecting:
/// * Credential creation: [CreatedPublicKeyCredential]
/// * Credential assertion: [AuthenticatedPublicKeyCredential]
///
/// <https://w3c.github.io/webauthn/#iface-pkcredential>
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredential<R: AuthenticatorResponse> {
    /// The credential ID, chosen by the authenticator. This is the base64url
    /// encoded data of [Self::raw_id].
    pub id: String,

    /// The raw bytes of the credential ID, see [Self::id].
    pub raw_id: Bytes,

    /// Always [PublicKeyCredentialType::PublicKey] for credentials produced
    /// by a platform authenticator.
    #[serde(rename = "type")]
    pub ty: PublicKeyCredentialType,

    /// The authenticator's response to the request: an
    /// [AuthenticatorAttestationResponse] for a creation, an
    /// [AuthenticatorAssertionResponse] for an assertion.
    pub response: R,
}
