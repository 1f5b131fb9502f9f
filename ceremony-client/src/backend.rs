//! Transport to the relying party's HTTP endpoints.

use serde_json::Value;
use url::Url;

use crate::FlowError;

mod reqwest_backend;

/// A trait to implement the JSON POST exchanges of a ceremony.
///
/// The implementer should take the following into consideration:
/// * Always send `Content-Type: application/json`, including when there is
///   no body (the begin-authentication exchange has none)
/// * Do not retry; a failed exchange fails the whole flow
/// * Return the reply body as parsed JSON regardless of HTTP status, since
///   relying parties report failures in the body
#[expect(async_fn_in_trait)]
pub trait Backend {
    /// POST `body`, when given, to `url` and return the JSON reply.
    async fn exchange(&self, url: &Url, body: Option<&Value>) -> Result<Value, FlowError>;
}
