// Upload - hands the finished payload to the results service

pub mod dry_run;
pub mod error;
pub mod http;

pub use dry_run::DryRunClient;
pub use error::{UploadError, UploadResult};
pub use http::HttpResultsClient;

use crate::state::RunPayload;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Response from the results service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Client for the results service
#[async_trait]
pub trait ResultsClient: Send + Sync {
    /// Upload the payload once
    async fn upload(&self, payload: &RunPayload) -> UploadResult<UploadResponse>;
}
