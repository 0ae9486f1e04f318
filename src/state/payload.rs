// Upload payload

use crate::state::{CaseResults, TestCase};
use serde::Serialize;

/// Top-level document handed to the upload client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunPayload {
    pub target: String,
    pub results: CaseResults,
    pub metadata: Metadata,
}

impl RunPayload {
    pub fn new(target: impl Into<String>, results: CaseResults, metadata: Metadata) -> Self {
        Self {
            target: target.into(),
            results,
            metadata,
        }
    }

    pub fn cases(&self) -> &[TestCase] {
        self.results.all()
    }
}

/// Static identifying information sent with the payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub integration_name: String,
    pub integration_version: String,
    pub test_framework: String,
}

impl Metadata {
    pub fn new(integration_name: impl Into<String>, test_framework: impl Into<String>) -> Self {
        Self {
            integration_name: integration_name.into(),
            integration_version: env!("CARGO_PKG_VERSION").to_string(),
            test_framework: test_framework.into(),
        }
    }
}
