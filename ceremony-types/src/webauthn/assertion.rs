//! Types used for public key authentication.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    Bytes,
    utils::serde::{ignore_unknown, ignore_unknown_opt_vec, maybe_stringified},
    webauthn::{PublicKeyCredential, PublicKeyCredentialDescriptor, UserVerificationRequirement},
};

#[cfg(doc)]
use crate::webauthn::PublicKeyCredentialUserEntity;

/// The response to the successful authentication of a [`PublicKeyCredential`]
#[typeshare]
pub type AuthenticatedPublicKeyCredential = PublicKeyCredential<AuthenticatorAssertionResponse>;

/// The data a `get()` request needs to generate an assertion, as a relying
/// party's begin-authentication endpoint produces it. Only `challenge` is
/// required.
///
/// Binary members arrive base64url-encoded and are decoded into raw
/// [`Bytes`] at the JSON boundary; unrecognized members are preserved in
/// [`Self::unknown_keys`].
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialrequestoptions>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialRequestOptions {
    /// The challenge the authenticator signs, along with other data, when
    /// producing the assertion.
    pub challenge: Bytes,

    /// A time, in milliseconds, that the relying party is willing to wait
    /// for the call to complete. A hint, which the client may override.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_stringified"
    )]
    pub timeout: Option<u32>,

    /// The [RP ID] claimed by the relying party. Defaults to the requesting
    /// origin's effective domain when omitted.
    ///
    /// [RP ID]: https://w3c.github.io/webauthn/#rp-id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp_id: Option<String>,

    /// The credentials eligible for this ceremony, most preferred first.
    /// When empty or absent, only discoverable credentials are utilized and
    /// the account is identified by the assertion's user handle.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown_opt_vec"
    )]
    pub allow_credentials: Option<Vec<PublicKeyCredentialDescriptor>>,

    /// The relying party's [user verification] requirements for the
    /// assertion.
    ///
    /// [user verification]: https://w3c.github.io/webauthn/#user-verification
    #[serde(default, deserialize_with = "ignore_unknown")]
    pub user_verification: UserVerificationRequirement,

    /// Any other option members the relying party sent. Preserved, in order,
    /// so they pass through to the platform authenticator untouched.
    #[serde(flatten)]
    pub unknown_keys: IndexMap<String, serde_json::Value>,
}

/// The authenticator's response to a request for a new authentication
/// assertion: a cryptographic signature proving possession of the credential
/// private key.
///
/// <https://w3c.github.io/webauthn/#iface-authenticatorassertionresponse>
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticatorAssertionResponse {
    /// The JSON serialization of the client data passed to the authenticator
    /// by the client in order to generate this assertion.
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: Bytes,

    /// The authenticator data used to generate the signature.
    pub authenticator_data: Bytes,

    /// The raw signature returned from the authenticator.
    pub signature: Bytes,

    /// The user handle stored with the credential, when the authenticator
    /// returns one. Mirrors the [`PublicKeyCredentialUserEntity::id`] the
    /// credential was created with. Serialized only when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<Bytes>,
}
