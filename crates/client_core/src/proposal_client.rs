//! Remote proposal endpoint client.

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    protocol::{ErrorBody, ProposeRequest, ProposeResponse},
    ProposalFailure, ProposalResult,
};
use tracing::{debug, warn};
use url::Url;

#[async_trait]
pub trait ProposalClient: Send + Sync {
    /// Sends one consultation. Implementations must not retry or cache.
    async fn submit_proposal(&self, text: &str) -> Result<ProposalResult, ProposalFailure>;
}

pub struct HttpProposalClient {
    http: Client,
    endpoint: Url,
}

impl HttpProposalClient {
    pub fn new(endpoint: Url) -> Self {
        Self::with_http_client(Client::new(), endpoint)
    }

    pub fn with_http_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl ProposalClient for HttpProposalClient {
    async fn submit_proposal(&self, text: &str) -> Result<ProposalResult, ProposalFailure> {
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(&ProposeRequest {
                text: text.to_string(),
            })
            .send()
            .await
            .map_err(|err| ProposalFailure::transport(format!("proposal request failed: {err}")))?;

        let status = res.status();
        let body = res.bytes().await.map_err(|err| {
            ProposalFailure::transport(format!("failed to read proposal response: {err}"))
        })?;
        debug!(status = status.as_u16(), bytes = body.len(), "proposal response received");

        let json: serde_json::Value = serde_json::from_slice(&body).map_err(|err| {
            ProposalFailure::malformed(format!("malformed proposal response: {err}"))
        })?;

        if !status.is_success() {
            let message = serde_json::from_value::<ErrorBody>(json)
                .ok()
                .and_then(|body| body.error);
            let failure = ProposalFailure::rejected(status.as_u16(), message);
            warn!(status = status.as_u16(), error = %failure, "proposal rejected by server");
            return Err(failure);
        }

        let parsed: ProposeResponse = serde_json::from_value(json).map_err(|err| {
            ProposalFailure::malformed(format!("malformed proposal response: {err}"))
        })?;
        Ok(parsed.into())
    }
}

#[cfg(test)]
#[path = "tests/proposal_client_tests.rs"]
mod tests;
