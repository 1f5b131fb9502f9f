use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use url::Url;

use crate::{Backend, FlowError};

impl Backend for reqwest::Client {
    async fn exchange(&self, url: &Url, body: Option<&Value>) -> Result<Value, FlowError> {
        let mut request = self.post(url.clone()).header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            log::error!("request to relying party failed: {err}");
            FlowError::Fetch
        })?;

        let bytes = response.bytes().await.map_err(|err| {
            log::error!("reading relying party reply failed: {err}");
            FlowError::Fetch
        })?;

        serde_json::from_slice(&bytes).map_err(|_| FlowError::Syntax)
    }
}
