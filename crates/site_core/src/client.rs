use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ContactPayload, ContactResponse};
use tracing::debug;
use url::Url;

use crate::{error::TransportError, form::ContactTransport};

/// Posts contact payloads as JSON to the contact endpoint.
///
/// The response body is read as a [`ContactResponse`] whatever the HTTP
/// status, so 4xx/5xx envelopes still surface their `error` text.
#[derive(Clone)]
pub struct HttpContactTransport {
    http: Client,
    endpoint: Url,
}

impl HttpContactTransport {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContactTransport for HttpContactTransport {
    async fn submit(&self, payload: &ContactPayload) -> Result<ContactResponse, TransportError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        debug!(status = %response.status(), endpoint = %self.endpoint, "contact endpoint answered");
        response
            .json::<ContactResponse>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
