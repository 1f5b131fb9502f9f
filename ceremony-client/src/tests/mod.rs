use std::{
    collections::VecDeque,
    sync::Mutex,
};

use ceremony_types::{encoding, rand::random_vec, webauthn};
use serde_json::{Value, json};
use url::Url;

use super::*;

/// A backend that answers from a canned list of replies and records every
/// exchange it was asked to make.
struct ScriptedBackend {
    replies: Mutex<VecDeque<Value>>,
    requests: Mutex<Vec<(Url, Option<Value>)>>,
}

impl ScriptedBackend {
    fn new(replies: impl IntoIterator<Item = Value>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<(Url, Option<Value>)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Backend for &ScriptedBackend {
    async fn exchange(&self, url: &Url, body: Option<&Value>) -> Result<Value, FlowError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.clone(), body.cloned()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(FlowError::Fetch)
    }
}

fn url(path: &str) -> Url {
    Url::parse("https://imoveis.example.com")
        .unwrap()
        .join(path)
        .unwrap()
}

fn creation_options_json() -> Value {
    json!({
        "rp": { "id": "imoveis.example.com", "name": "Imóveis Exemplo" },
        "user": {
            "id": encoding::base64url(&[10, 11, 12]),
            "name": "ana",
            "displayName": "Ana Souza"
        },
        "challenge": encoding::base64url(&[13, 14, 15]),
        "pubKeyCredParams": [{ "type": "public-key", "alg": -7 }],
        "excludeCredentials": [
            { "type": "public-key", "id": encoding::base64url(&[16, 17]) }
        ],
        "attestation": "none"
    })
}

fn request_options_json() -> Value {
    json!({
        "challenge": encoding::base64url(&[20, 21, 22]),
        "rpId": "imoveis.example.com",
        "allowCredentials": [
            { "type": "public-key", "id": encoding::base64url(&[23, 24]) }
        ]
    })
}

fn created_credential(raw_id: Vec<u8>) -> webauthn::CreatedPublicKeyCredential {
    webauthn::PublicKeyCredential {
        id: encoding::base64url(&raw_id),
        raw_id: raw_id.into(),
        ty: webauthn::PublicKeyCredentialType::PublicKey,
        response: webauthn::AuthenticatorAttestationResponse {
            client_data_json: vec![4, 5, 6].into(),
            attestation_object: vec![1, 2, 3].into(),
            transports: Some(vec![webauthn::AuthenticatorTransport::Internal]),
        },
    }
}

fn assertion_credential(
    raw_id: Vec<u8>,
    user_handle: Option<Vec<u8>>,
) -> webauthn::AuthenticatedPublicKeyCredential {
    webauthn::PublicKeyCredential {
        id: encoding::base64url(&raw_id),
        raw_id: raw_id.into(),
        ty: webauthn::PublicKeyCredentialType::PublicKey,
        response: webauthn::AuthenticatorAssertionResponse {
            client_data_json: vec![4, 5, 6].into(),
            authenticator_data: vec![1, 2, 3].into(),
            signature: vec![7, 8, 9].into(),
            user_handle: user_handle.map(Into::into),
        },
    }
}

#[tokio::test]
async fn registration_stops_when_the_relying_party_refuses() {
    let backend = ScriptedBackend::new([json!({ "error": "cadastro indisponível" })]);
    let mut container = MockCredentialsContainer::new();
    container.expect_create().never();
    let mut user_agent = MockUserAgent::new();
    user_agent
        .expect_alert()
        .withf(|message| message == "cadastro indisponível")
        .times(1)
        .return_const(());

    let client = Client::new_with_backend(container, user_agent, &backend);
    let err = client
        .register(&url("/register/begin"), &url("/register/complete"), "laptop")
        .await
        .unwrap_err();

    assert_eq!(err, FlowError::Server("cadastro indisponível".into()));
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn registration_submits_the_encoded_credential() {
    let backend = ScriptedBackend::new([creation_options_json(), json!({ "verified": true })]);
    let raw_id = random_vec(16);
    let credential = created_credential(raw_id.clone());
    let mut container = MockCredentialsContainer::new();
    container
        .expect_create()
        .times(1)
        .returning(move |_| Ok(credential.clone()));
    let mut user_agent = MockUserAgent::new();
    user_agent.expect_reload().times(1).return_const(());

    let client = Client::new_with_backend(container, user_agent, &backend);
    let outcome = client
        .register(
            &url("/register/begin"),
            &url("/register/complete"),
            "chave do notebook",
        )
        .await
        .unwrap();

    assert_eq!(outcome, FlowOutcome::Reload);

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);

    let (begin_url, begin_body) = &requests[0];
    assert_eq!(begin_url.path(), "/register/begin");
    assert_eq!(
        begin_body.as_ref().unwrap(),
        &json!({ "name": "chave do notebook" })
    );

    let (complete_url, complete_body) = &requests[1];
    assert_eq!(complete_url.path(), "/register/complete");
    let body = complete_body.as_ref().unwrap();
    assert_eq!(body["name"], "chave do notebook");
    assert_eq!(body["type"], "public-key");
    assert_eq!(body["rawId"], encoding::base64url(&raw_id));
    assert_eq!(body["response"]["attestationObject"], "AQID");
    assert_eq!(body["response"]["clientDataJSON"], "BAUG");
    assert_eq!(body["response"]["transports"], json!(["internal"]));
}

#[tokio::test]
async fn registration_decodes_binary_options_for_the_platform() {
    let backend = ScriptedBackend::new([creation_options_json(), json!({})]);
    let mut container = MockCredentialsContainer::new();
    container
        .expect_create()
        .withf(|options| {
            *options.challenge == vec![13, 14, 15]
                && *options.user.id == vec![10, 11, 12]
                && options
                    .exclude_credentials
                    .as_deref()
                    .is_some_and(|excluded| *excluded[0].id == vec![16, 17])
        })
        .times(1)
        .returning(|_| Ok(created_credential(vec![1])));
    let mut user_agent = MockUserAgent::new();
    user_agent.expect_reload().times(1).return_const(());

    let client = Client::new_with_backend(container, user_agent, &backend);
    client
        .register(&url("/register/begin"), &url("/register/complete"), "laptop")
        .await
        .unwrap();
}

#[tokio::test]
async fn registration_stays_silent_when_the_user_cancels() {
    let backend = ScriptedBackend::new([creation_options_json()]);
    let mut container = MockCredentialsContainer::new();
    container
        .expect_create()
        .times(1)
        .returning(|_| Err(PlatformError::NotAllowed));
    // no expectations: any alert, reload or navigation would panic
    let user_agent = MockUserAgent::new();

    let client = Client::new_with_backend(container, user_agent, &backend);
    let outcome = client
        .register(&url("/register/begin"), &url("/register/complete"), "laptop")
        .await
        .unwrap();

    assert_eq!(outcome, FlowOutcome::Cancelled);
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn registration_alerts_generic_text_on_platform_failure() {
    let backend = ScriptedBackend::new([creation_options_json()]);
    let mut container = MockCredentialsContainer::new();
    container
        .expect_create()
        .times(1)
        .returning(|_| Err(PlatformError::Other("authenticator unplugged".into())));
    let mut user_agent = MockUserAgent::new();
    user_agent
        .expect_alert()
        .withf(|message| message == REGISTRATION_FAILED)
        .times(1)
        .return_const(());

    let client = Client::new_with_backend(container, user_agent, &backend);
    let err = client
        .register(&url("/register/begin"), &url("/register/complete"), "laptop")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FlowError::Platform(PlatformError::Other("authenticator unplugged".into()))
    );
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn registration_surfaces_complete_errors_verbatim() {
    let backend = ScriptedBackend::new([
        creation_options_json(),
        json!({ "error": "nome já utilizado" }),
    ]);
    let mut container = MockCredentialsContainer::new();
    container
        .expect_create()
        .times(1)
        .returning(|_| Ok(created_credential(vec![1])));
    let mut user_agent = MockUserAgent::new();
    user_agent
        .expect_alert()
        .withf(|message| message == "nome já utilizado")
        .times(1)
        .return_const(());

    let client = Client::new_with_backend(container, user_agent, &backend);
    let err = client
        .register(&url("/register/begin"), &url("/register/complete"), "laptop")
        .await
        .unwrap_err();

    assert_eq!(err, FlowError::Server("nome já utilizado".into()));
}

#[tokio::test]
async fn registration_reports_malformed_options() {
    // a challenge that is not base64url can only mean a corrupted or
    // mismatched reply; it is not the user's problem to solve
    let backend = ScriptedBackend::new([json!({
        "rp": { "name": "Imóveis Exemplo" },
        "user": { "id": "AQID", "name": "ana", "displayName": "Ana" },
        "challenge": "not+base64url=",
        "pubKeyCredParams": []
    })]);
    let mut container = MockCredentialsContainer::new();
    container.expect_create().never();
    let mut user_agent = MockUserAgent::new();
    user_agent
        .expect_alert()
        .withf(|message| message == REGISTRATION_FAILED)
        .times(1)
        .return_const(());

    let client = Client::new_with_backend(container, user_agent, &backend);
    let err = client
        .register(&url("/register/begin"), &url("/register/complete"), "laptop")
        .await
        .unwrap_err();

    assert_eq!(err, FlowError::Syntax);
}

#[tokio::test]
async fn authentication_begins_with_an_empty_body() {
    let backend = ScriptedBackend::new([request_options_json(), json!({})]);
    let mut container = MockCredentialsContainer::new();
    container
        .expect_get()
        .withf(|options| {
            *options.challenge == vec![20, 21, 22]
                && options
                    .allow_credentials
                    .as_deref()
                    .is_some_and(|allowed| *allowed[0].id == vec![23, 24])
        })
        .times(1)
        .returning(|_| Ok(assertion_credential(vec![2], None)));
    let mut user_agent = MockUserAgent::new();
    user_agent.expect_reload().times(1).return_const(());

    let client = Client::new_with_backend(container, user_agent, &backend);
    client
        .authenticate(&url("/login/begin"), &url("/login/complete"))
        .await
        .unwrap();

    let requests = backend.requests();
    assert_eq!(requests[0].0.path(), "/login/begin");
    assert_eq!(requests[0].1, None);
}

#[tokio::test]
async fn authentication_submits_the_encoded_assertion() {
    let backend = ScriptedBackend::new([request_options_json(), json!({})]);
    let raw_id = random_vec(16);
    let credential = assertion_credential(raw_id.clone(), Some(vec![10, 11, 12]));
    let mut container = MockCredentialsContainer::new();
    container
        .expect_get()
        .times(1)
        .returning(move |_| Ok(credential.clone()));
    let mut user_agent = MockUserAgent::new();
    user_agent.expect_reload().times(1).return_const(());

    let client = Client::new_with_backend(container, user_agent, &backend);
    client
        .authenticate(&url("/login/begin"), &url("/login/complete"))
        .await
        .unwrap();

    let requests = backend.requests();
    let body = requests[1].1.as_ref().unwrap();
    assert_eq!(body["rawId"], encoding::base64url(&raw_id));
    assert_eq!(body["type"], "public-key");
    assert_eq!(body["response"]["authenticatorData"], "AQID");
    assert_eq!(body["response"]["clientDataJSON"], "BAUG");
    assert_eq!(body["response"]["signature"], "BwgJ");
    assert_eq!(body["response"]["userHandle"], encoding::base64url(&[10, 11, 12]));
    // registration fields must not leak into an assertion
    assert!(body.get("name").is_none());
}

#[tokio::test]
async fn assertions_without_a_user_handle_omit_the_member() {
    let backend = ScriptedBackend::new([request_options_json(), json!({})]);
    let mut container = MockCredentialsContainer::new();
    container
        .expect_get()
        .times(1)
        .returning(|_| Ok(assertion_credential(vec![2], None)));
    let mut user_agent = MockUserAgent::new();
    user_agent.expect_reload().times(1).return_const(());

    let client = Client::new_with_backend(container, user_agent, &backend);
    client
        .authenticate(&url("/login/begin"), &url("/login/complete"))
        .await
        .unwrap();

    let requests = backend.requests();
    let body = requests[1].1.as_ref().unwrap();
    assert!(body["response"].get("userHandle").is_none());
}

#[tokio::test]
async fn authentication_follows_the_redirect_target() {
    let backend =
        ScriptedBackend::new([request_options_json(), json!({ "redirect": "/painel" })]);
    let mut container = MockCredentialsContainer::new();
    container
        .expect_get()
        .times(1)
        .returning(|_| Ok(assertion_credential(vec![2], None)));
    let mut user_agent = MockUserAgent::new();
    user_agent
        .expect_navigate()
        .withf(|target| target == "/painel")
        .times(1)
        .return_const(());

    let client = Client::new_with_backend(container, user_agent, &backend);
    let outcome = client
        .authenticate(&url("/login/begin"), &url("/login/complete"))
        .await
        .unwrap();

    assert_eq!(outcome, FlowOutcome::Redirect("/painel".into()));
}

#[tokio::test]
async fn authentication_reloads_without_a_redirect() {
    let backend = ScriptedBackend::new([request_options_json(), json!({ "verified": true })]);
    let mut container = MockCredentialsContainer::new();
    container
        .expect_get()
        .times(1)
        .returning(|_| Ok(assertion_credential(vec![2], None)));
    let mut user_agent = MockUserAgent::new();
    user_agent.expect_reload().times(1).return_const(());

    let client = Client::new_with_backend(container, user_agent, &backend);
    let outcome = client
        .authenticate(&url("/login/begin"), &url("/login/complete"))
        .await
        .unwrap();

    assert_eq!(outcome, FlowOutcome::Reload);
}

#[tokio::test]
async fn authentication_stays_silent_when_the_user_cancels() {
    let backend = ScriptedBackend::new([request_options_json()]);
    let mut container = MockCredentialsContainer::new();
    container
        .expect_get()
        .times(1)
        .returning(|_| Err(PlatformError::NotAllowed));
    let user_agent = MockUserAgent::new();

    let client = Client::new_with_backend(container, user_agent, &backend);
    let outcome = client
        .authenticate(&url("/login/begin"), &url("/login/complete"))
        .await
        .unwrap();

    assert_eq!(outcome, FlowOutcome::Cancelled);
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn authentication_surfaces_begin_errors_verbatim() {
    let backend = ScriptedBackend::new([json!({ "error": "sessão expirada" })]);
    let mut container = MockCredentialsContainer::new();
    container.expect_get().never();
    let mut user_agent = MockUserAgent::new();
    user_agent
        .expect_alert()
        .withf(|message| message == "sessão expirada")
        .times(1)
        .return_const(());

    let client = Client::new_with_backend(container, user_agent, &backend);
    let err = client
        .authenticate(&url("/login/begin"), &url("/login/complete"))
        .await
        .unwrap_err();

    assert_eq!(err, FlowError::Server("sessão expirada".into()));
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn unreachable_endpoints_alert_the_generic_text() {
    let backend = ScriptedBackend::new([]);
    let mut container = MockCredentialsContainer::new();
    container.expect_get().never();
    let mut user_agent = MockUserAgent::new();
    user_agent
        .expect_alert()
        .withf(|message| message == AUTHENTICATION_FAILED)
        .times(1)
        .return_const(());

    let client = Client::new_with_backend(container, user_agent, &backend);
    let err = client
        .authenticate(&url("/login/begin"), &url("/login/complete"))
        .await
        .unwrap_err();

    assert_eq!(err, FlowError::Fetch);
}
