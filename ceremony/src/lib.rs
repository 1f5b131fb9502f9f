//! # Ceremony
//!
//! The `ceremony` library drives passkey ([Webauthn]) ceremonies from the
//! client side: it speaks to a relying party's begin/complete HTTP endpoints
//! and relays the options and credentials between them and the platform's
//! native credential capability. It is comprised of two sub-libraries:
//!
//! - `ceremony-client` - usable as [`client`], the registration and
//!   authentication flows and the traits they are driven through.
//! - `ceremony-types` - usable as [`types`], the WebAuthn option/credential
//!   structures, the begin/complete protocol envelopes, and the base64url
//!   codec that carries binary fields across the JSON boundary.
//!
//! ## Basic Concepts
//!
//! A relying party exposes two endpoints per ceremony. The begin endpoint
//! answers with ceremony options whose binary members (challenge, user
//! handle, credential ids) arrive base64url-encoded; the complete endpoint
//! receives the credential the platform produced, with its binary members
//! re-encoded the same way. Everything between the two endpoints is the
//! platform's business: the [`client::Client`] only marshals data, it
//! performs no cryptographic operations.
//!
//! You can think of a ceremony as the following chain:
//!
//! RelyingParty <-> [`Client`](client::Client) <-> [`CredentialsContainer`](client::CredentialsContainer)
//!
//! The [`Client`](client::Client) provides one function per ceremony:
//!
//! - [`register()`](client::Client::register()) - create a passkey and
//!   submit it under a user-chosen label.
//! - [`authenticate()`](client::Client::authenticate()) - prove possession
//!   of an existing passkey.
//!
//! Three traits connect the client to its surroundings, all injected so the
//! flows run deterministically under test:
//!
//! - [`client::CredentialsContainer`] - the platform's credential prompt,
//!   the equivalent of the web's `navigator.credentials`.
//! - [`client::UserAgent`] - the page-level surfaces: blocking alerts,
//!   reload, navigation.
//! - [`client::Backend`] - the HTTP transport; an implementation for
//!   `reqwest::Client` ships with the crate.
//!
//! [Webauthn]: https://w3c.github.io/webauthn/
//!
//! ### Example: running a registration ceremony
//!
//! The example wires the client to canned collaborators; a real embedding
//! would bridge them to the platform prompt, the host UI and live HTTP.
//!
//! ```
//! use ceremony::{
//!     client::{
//!         Backend, Client, CredentialsContainer, FlowError, FlowOutcome, PlatformError,
//!         UserAgent,
//!     },
//!     types::{encoding, webauthn},
//! };
//! use serde_json::{Value, json};
//! use url::Url;
//!
//! // Answers the platform ceremony with a canned credential.
//! struct CannedPrompt;
//!
//! #[async_trait::async_trait]
//! impl CredentialsContainer for CannedPrompt {
//!     async fn create(
//!         &self,
//!         options: webauthn::PublicKeyCredentialCreationOptions,
//!     ) -> Result<webauthn::CreatedPublicKeyCredential, PlatformError> {
//!         let raw_id = vec![7; 16];
//!         Ok(webauthn::PublicKeyCredential {
//!             id: encoding::base64url(&raw_id),
//!             raw_id: raw_id.into(),
//!             ty: webauthn::PublicKeyCredentialType::PublicKey,
//!             response: webauthn::AuthenticatorAttestationResponse {
//!                 client_data_json: options.challenge,
//!                 attestation_object: vec![1, 2, 3].into(),
//!                 transports: None,
//!             },
//!         })
//!     }
//!
//!     async fn get(
//!         &self,
//!         _options: webauthn::PublicKeyCredentialRequestOptions,
//!     ) -> Result<webauthn::AuthenticatedPublicKeyCredential, PlatformError> {
//!         Err(PlatformError::NotAllowed)
//!     }
//! }
//!
//! // Page surfaces; nothing to show in this example.
//! struct Page;
//! impl UserAgent for Page {
//!     fn alert(&self, _message: &str) {}
//!     fn reload(&self) {}
//!     fn navigate(&self, _target: &str) {}
//! }
//!
//! // Canned relying party replies instead of live HTTP.
//! struct CannedRelyingParty;
//! impl Backend for CannedRelyingParty {
//!     async fn exchange(&self, url: &Url, _body: Option<&Value>) -> Result<Value, FlowError> {
//!         Ok(if url.path().ends_with("/begin") {
//!             json!({
//!                 "rp": { "name": "Imóveis Exemplo" },
//!                 "user": { "id": "AQID", "name": "ana", "displayName": "Ana" },
//!                 "challenge": "ZcPUob9wS72YNHkRPnFypA",
//!                 "pubKeyCredParams": [{ "type": "public-key", "alg": -7 }]
//!             })
//!         } else {
//!             json!({ "verified": true })
//!         })
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let client = Client::new_with_backend(CannedPrompt, Page, CannedRelyingParty);
//! let begin = Url::parse("https://imoveis.example.com/webauthn/register/begin").unwrap();
//! let complete = Url::parse("https://imoveis.example.com/webauthn/register/complete").unwrap();
//!
//! let outcome = client
//!     .register(&begin, &complete, "chave do notebook")
//!     .await
//!     .unwrap();
//! assert_eq!(outcome, FlowOutcome::Reload);
//! # })
//! ```

pub use ceremony_client as client;
pub use ceremony_types as types;
