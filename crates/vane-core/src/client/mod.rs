//! HTTP client for the scoring service.
//!
//! One blocking round trip per invocation: POST the headline batch, parse
//! whatever JSON comes back, and run it through the response normalizer.
//! No retries, no streaming; the configured timeout is the only bound.

mod error;

pub use error::ClientError;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::normalize;
use crate::record::ScoreRecord;

#[derive(Serialize)]
struct ScoreRequest<'a> {
    headlines: &'a [String],
}

/// Liveness reply from `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Client for one scoring service endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
    status_url: String,
}

impl ApiClient {
    /// Builds a client from configuration. The timeout applies to every
    /// request this client sends.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            status_url: config.status_url(),
        })
    }

    /// The scoring endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Scores a batch of headlines and normalizes the response into
    /// ordered records aligned with `headlines`.
    pub async fn score(&self, headlines: &[String]) -> Result<Vec<ScoreRecord>, ClientError> {
        debug!(count = headlines.len(), endpoint = %self.endpoint, "Posting scoring request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&ScoreRequest { headlines })
            .send()
            .await?
            .error_for_status()?;

        let raw: serde_json::Value = response.json().await?;
        Ok(normalize::normalize(&raw, headlines)?)
    }

    /// Probes the service's liveness endpoint.
    pub async fn status(&self) -> Result<StatusResponse, ClientError> {
        let response = self
            .http
            .get(&self.status_url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}
