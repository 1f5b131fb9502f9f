//! Types specific to public key credential creation.
use coset::iana;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    Bytes,
    utils::serde::{
        i64_to_iana, ignore_unknown, ignore_unknown_opt_vec, ignore_unknown_vec, maybe_stringified,
    },
    webauthn::{
        AuthenticatorAttachment, AuthenticatorTransport, PublicKeyCredential,
        PublicKeyCredentialDescriptor, PublicKeyCredentialType, UserVerificationRequirement,
    },
};

#[cfg(doc)]
use crate::webauthn::AuthenticatorAssertionResponse;


/// The response to the successful creation of a PublicKeyCredential
#[typeshare]
pub type CreatedPublicKeyCredential = PublicKeyCredential<AuthenticatorAttestationResponse>;

/// The request for creating a [`PublicKeyCredential`], as a relying party's
/// begin-registration endpoint produces it.
///
/// Binary members arrive base64url-encoded and are decoded into raw
/// [`Bytes`] at the JSON boundary, which is the form a platform
/// authenticator consumes. Option members this library has no opinion on are
/// preserved in [`Self::unknown_keys`] so they still reach the platform.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialcreationoptions>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialCreationOptions {
    /// A name and an identifier for the [Relying Party] responsible for the
    /// request.
    ///
    /// [Relying Party]: https://w3c.github.io/webauthn/#relying-party
    pub rp: PublicKeyCredentialRpEntity,

    /// Names and an identifier for the user account performing the
    /// registration. The entity's id can come back as the
    /// [`AuthenticatorAssertionResponse::user_handle`] of future
    /// authentication ceremonies.
    pub user: PublicKeyCredentialUserEntity,

    /// The challenge the authenticator signs, along with other data, when
    /// producing an attestation for the newly created credential.
    pub challenge: Bytes,

    /// The key types and signature algorithms the relying party supports,
    /// ordered from most to least preferred. Entries with identifiers this
    /// client does not recognize are dropped, as the spec requires.
    #[serde(deserialize_with = "ignore_unknown_vec")]
    pub pub_key_cred_params: Vec<PublicKeyCredentialParameters>,

    /// A time, in milliseconds, that the relying party is willing to wait
    /// for the call to complete. A hint, which the client may override.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_stringified"
    )]
    pub timeout: Option<u32>,

    /// Credentials already mapped to this user account. A new credential is
    /// not created on an authenticator that holds one of these.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown_opt_vec"
    )]
    pub exclude_credentials: Option<Vec<PublicKeyCredentialDescriptor>>,

    /// Capabilities and settings the authenticator must or should satisfy to
    /// participate in the creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_selection: Option<AuthenticatorSelectionCriteria>,

    /// The relying party's preference regarding attestation conveyance.
    /// Unknown values act as the default.
    #[serde(default, deserialize_with = "ignore_unknown")]
    pub attestation: AttestationConveyancePreference,

    /// Any other option members the relying party sent. Preserved, in order,
    /// so they pass through to the platform authenticator untouched.
    #[serde(flatten)]
    pub unknown_keys: IndexMap<String, serde_json::Value>,
}

/// Additional relying party attributes used when creating a new credential.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialrpentity>
#[derive(Debug, Serialize, Deserialize, Clone)]
#[typeshare]
pub struct PublicKeyCredentialRpEntity {
    /// A unique identifier for the relying party entity, which sets the
    /// [RP ID]. Defaults to the requesting origin's effective domain when
    /// omitted.
    ///
    /// [RP ID]: https://w3c.github.io/webauthn/#rp-id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// A human-palatable identifier for the relying party, intended only for
    /// display.
    pub name: String,
}

/// Additional user account attributes used when creating a new credential.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialuserentity>
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredentialUserEntity {
    /// The user handle of the user account: an opaque byte sequence of at
    /// most 64 bytes, never displayed to the user and never containing
    /// personally identifying information.
    pub id: Bytes,

    /// A human-palatable name for the user account, intended only for
    /// display, for example "Ana Müller".
    pub display_name: String,

    /// A human-palatable identifier for the user account, intended only for
    /// display and for telling accounts with similar display names apart,
    /// for example "ana" or "ana@example.com".
    pub name: String,
}

/// The type and signature algorithm of a credential the relying party is
/// willing to accept.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialparameters>
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[typeshare]
pub struct PublicKeyCredentialParameters {
    /// The type of credential to be created.
    #[serde(rename = "type", deserialize_with = "ignore_unknown")]
    pub ty: PublicKeyCredentialType,

    /// The cryptographic signature algorithm the new credential will be used
    /// with, and thus the type of asymmetric key pair to be generated.
    #[serde(with = "i64_to_iana")]
    #[typeshare(serialized_as = "I54")] // because i64 fails for js
    pub alg: iana::Algorithm,
}

/// Requirements regarding authenticator attributes for a creation ceremony.
///
/// <https://w3c.github.io/webauthn/#dictdef-authenticatorselectioncriteria>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticatorSelectionCriteria {
    /// Restricts eligible authenticators to the given attachment modality.
    /// Unknown values are treated as if the member were absent.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown"
    )]
    pub authenticator_attachment: Option<AuthenticatorAttachment>,

    /// The extent to which the relying party desires a client-side
    /// [discoverable credential].
    ///
    /// [discoverable credential]: https://w3c.github.io/webauthn/#client-side-discoverable-credential
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown"
    )]
    pub resident_key: Option<ResidentKeyRequirement>,

    /// Retained for backwards compatibility with WebAuthn Level 1; relying
    /// parties set it to `true` if, and only if, [`Self::resident_key`] is
    /// set to required.
    #[serde(default)]
    pub require_resident_key: bool,

    /// The relying party's [user verification] requirements for the
    /// creation.
    ///
    /// [user verification]: https://w3c.github.io/webauthn/#user-verification
    #[serde(default, deserialize_with = "ignore_unknown")]
    pub user_verification: UserVerificationRequirement,
}

/// The relying party's requirements for client-side [discoverable
/// credentials] (formerly known as resident keys).
///
/// <https://w3c.github.io/webauthn/#enumdef-residentkeyrequirement>
///
/// [discoverable credentials]: https://w3c.github.io/webauthn/#client-side-discoverable-credential
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum ResidentKeyRequirement {
    /// A server-side credential is preferred, a discoverable one accepted.
    Discouraged,

    /// A discoverable credential is preferred, a server-side one accepted.
    Preferred,

    /// The ceremony must fail if a discoverable credential cannot be
    /// created.
    Required,
}

/// The relying party's preference regarding [attestation conveyance] during
/// credential generation.
///
/// <https://w3c.github.io/webauthn/#enumdef-attestationconveyancepreference>
///
/// [attestation conveyance]: https://w3c.github.io/webauthn/#attestation-conveyance
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum AttestationConveyancePreference {
    /// The relying party is not interested in authenticator attestation.
    /// This is the default, and unknown values fall back to it.
    #[default]
    None,

    /// A verifiable attestation statement is wanted, but the client decides
    /// how to obtain it.
    Indirect,

    /// The attestation statement as generated by the authenticator.
    Direct,

    /// An attestation statement that may include uniquely identifying
    /// information, for controlled enterprise deployments.
    Enterprise,
}

/// The authenticator's response to a request to create a new
/// [`PublicKeyCredential`].
///
/// <https://w3c.github.io/webauthn/#iface-authenticatorattestationresponse>
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare(swift = "Equatable, Hashable")]
pub struct AuthenticatorAttestationResponse {
    /// The JSON serialization of the client data passed to the authenticator
    /// by the client in order to generate this credential.
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: Bytes,

    /// The attestation object, opaque to the client: authenticator data and
    /// an attestation statement, verified server-side.
    pub attestation_object: Bytes,

    /// The transports the authenticator is believed to support. Serialized
    /// only when the platform exposes the information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transports: Option<Vec<AuthenticatorTransport>>,
}
