//! HTTP client for the results service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::config::UploadConfig;
use crate::state::RunPayload;
use crate::upload::{ResultsClient, UploadError, UploadResponse, UploadResult};

/// User agent for upload requests.
const USER_AGENT_VALUE: &str = concat!("results-reporter/", env!("CARGO_PKG_VERSION"));

/// Posts payloads as JSON to the configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpResultsClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpResultsClient {
    /// Create a new client.
    pub fn new(config: &UploadConfig) -> UploadResult<Self> {
        url::Url::parse(&config.endpoint).map_err(|e| UploadError::Config {
            message: format!("invalid endpoint {}: {}", config.endpoint, e),
        })?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| UploadError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Get the endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ResultsClient for HttpResultsClient {
    async fn upload(&self, payload: &RunPayload) -> UploadResult<UploadResponse> {
        debug!(endpoint = %self.endpoint, cases = payload.cases().len(), "posting results");

        let response = self.client.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await.map_err(|e| UploadError::Network {
            message: format!("failed to read response body: {}", e),
        })?;

        match status.as_u16() {
            200..=299 => serde_json::from_str(&body).map_err(|e| UploadError::InvalidResponse {
                message: format!("failed to parse upload response: {}", e),
            }),

            // The service explains rejected payloads in the usual response shape.
            400..=499 => serde_json::from_str(&body).map_err(|_| UploadError::Http {
                status: status.as_u16(),
                message: body_or_reason(&body, status),
            }),

            _ => Err(UploadError::Http {
                status: status.as_u16(),
                message: body_or_reason(&body, status),
            }),
        }
    }
}

fn body_or_reason(body: &str, status: reqwest::StatusCode) -> String {
    if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("unknown status").to_string()
    } else {
        body.to_string()
    }
}
