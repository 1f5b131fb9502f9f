//! Types used in both credential creation (registration) and assertion
//! (authentication).

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    Bytes,
    utils::serde::{ignore_unknown, ignore_unknown_opt_vec},
};

#[cfg(doc)]
use crate::webauthn::{
    AuthenticatorAttestationResponse, PublicKeyCredential, PublicKeyCredentialCreationOptions,
    PublicKeyCredentialRequestOptions,
};

/// This enumeration defines the valid credential types. It is an extension
/// point; values can be added to it in the future, as more credential types
/// are defined.
///
/// <https://w3c.github.io/webauthn/#enumdef-publickeycredentialtype>
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[typeshare(serialized_as = "String")]
pub enum PublicKeyCredentialType {
    /// Currently the only type defined, the public counterpart of an
    /// asymmetric key pair.
    PublicKey,
    /// The default for values unknown at deserialization, which clients must
    /// tolerate.
    #[default]
    Unknown,
}

/// Identifies a specific public key credential. Used in
/// [`PublicKeyCredentialCreationOptions::exclude_credentials`] to prevent
/// creating duplicate credentials on the same authenticator, and in
/// [`PublicKeyCredentialRequestOptions::allow_credentials`] to restrict which
/// credentials may answer an authentication.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialdescriptor>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[typeshare]
pub struct PublicKeyCredentialDescriptor {
    /// The type of the credential the caller is referring to. Entries of an
    /// unknown type must be ignored, see [`Self::is_known`].
    #[serde(rename = "type", deserialize_with = "ignore_unknown")]
    pub ty: PublicKeyCredentialType,

    /// The credential ID of the credential the caller is referring to.
    /// Mirrors the [`PublicKeyCredential::raw_id`] field.
    pub id: Bytes,

    /// An optional hint as to how the client might communicate with the
    /// managing authenticator of the credential. Mirrors the
    /// [`AuthenticatorAttestationResponse::transports`] the relying party
    /// stored at registration time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown_opt_vec"
    )]
    pub transports: Option<Vec<AuthenticatorTransport>>,
}

impl PublicKeyCredentialDescriptor {
    /// Whether [`Self::ty`] is a known credential type. Descriptors that are
    /// not should be filtered out before use.
    pub fn is_known(&self) -> bool {
        match self.ty {
            PublicKeyCredentialType::PublicKey => true,
            PublicKeyCredentialType::Unknown => false,
        }
    }
}

/// A relying party may require [user verification] for some of its operations
/// but not for others, and may use this type to express its needs.
///
/// <https://w3c.github.io/webauthn/#enumdef-userverificationrequirement>
///
/// [user verification]: https://w3c.github.io/webauthn/#user-verification
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum UserVerificationRequirement {
    /// The ceremony must fail unless the user was verified.
    Required,

    /// Verification is preferred but its absence does not fail the ceremony.
    #[default]
    Preferred,

    /// The relying party does not want user verification employed.
    Discouraged,
}

/// Hints as to how clients might communicate with a particular authenticator
/// in order to obtain a credential.
///
/// <https://w3c.github.io/webauthn/#enum-transport>
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum AuthenticatorTransport {
    /// The authenticator can be contacted over removable USB.
    Usb,

    /// The authenticator can be contacted over Near Field Communication.
    Nfc,

    /// The authenticator can be contacted over Bluetooth Low Energy.
    Ble,

    /// The authenticator can be contacted using a combination of (often
    /// separate) data-transport and proximity mechanisms, for example a
    /// phone answering a prompt shown on a desktop.
    #[serde(alias = "cable")]
    Hybrid,

    /// A platform authenticator built into the client device.
    Internal,
}

/// Describes an authenticator's attachment modality, used by relying parties
/// to express a preference at creation time.
///
/// <https://w3c.github.io/webauthn/#enumdef-authenticatorattachment>
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[typeshare(serialized_as = "String")]
pub enum AuthenticatorAttachment {
    /// Attached using a client device-specific transport and usually not
    /// removable from it.
    Platform,

    /// Removable from, and able to roam between, client devices.
    CrossPlatform,
}
