// Dry-run client - prints the payload instead of uploading it

use super::{ResultsClient, UploadError, UploadResponse, UploadResult};
use crate::state::RunPayload;
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;

/// Writes the pretty-printed payload and reports success
pub struct DryRunClient {
    out: Mutex<Box<dyn Write + Send>>,
}

impl DryRunClient {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }
}

#[async_trait]
impl ResultsClient for DryRunClient {
    async fn upload(&self, payload: &RunPayload) -> UploadResult<UploadResponse> {
        let mut out = self.out.lock().map_err(|_| UploadError::Config {
            message: "dry-run output unavailable".to_string(),
        })?;

        serde_json::to_writer_pretty(&mut *out, payload)
            .map_err(|e| UploadError::InvalidResponse {
                message: format!("failed to serialize payload: {}", e),
            })?;
        writeln!(out).and_then(|_| out.flush()).map_err(|e| UploadError::Network {
            message: format!("failed to write payload: {}", e),
        })?;

        Ok(UploadResponse {
            success: true,
            message: format!("dry run, {} cases not uploaded", payload.cases().len()),
            warnings: Vec::new(),
            errors: Vec::new(),
        })
    }
}
