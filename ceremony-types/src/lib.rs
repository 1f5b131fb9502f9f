//! # Ceremony Types
//!
//! Type definitions for driving passkey (WebAuthn) ceremonies against a
//! relying party's HTTP endpoints.
//!
//! The [`webauthn`] module holds the option and credential structures that
//! cross the JSON boundary between relying party and platform authenticator,
//! the [`protocol`] module holds the begin/complete HTTP envelopes, and
//! [`Bytes`] carries binary credential fields through both, base64url-encoded
//! on the wire and raw bytes in memory.

mod utils;

pub mod protocol;
pub mod webauthn;

// Re-exports
pub use utils::{
    bytes::Bytes,
    encoding::{self, NotBase64UrlEncoded},
    rand,
};
