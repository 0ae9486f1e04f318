// Shared helpers for reporter integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use results_reporter::upload::UploadResult;
use results_reporter::{ResultsClient, ResultsReporter, RunPayload, UploadResponse};
use std::sync::{Arc, Mutex};

/// Client that keeps every payload and answers with a canned response
#[derive(Default)]
pub struct RecordingClient {
    payloads: Mutex<Vec<RunPayload>>,
    response: UploadResponse,
}

impl RecordingClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            payloads: Mutex::new(Vec::new()),
            response: UploadResponse {
                success: true,
                message: "Success".to_string(),
                warnings: vec!["case missing duration".to_string()],
                errors: Vec::new(),
            },
        })
    }

    pub fn payloads(&self) -> Vec<RunPayload> {
        self.payloads.lock().unwrap().clone()
    }

    pub fn last(&self) -> RunPayload {
        self.payloads().pop().expect("no payload uploaded")
    }
}

#[async_trait]
impl ResultsClient for RecordingClient {
    async fn upload(&self, payload: &RunPayload) -> UploadResult<UploadResponse> {
        self.payloads.lock().unwrap().push(payload.clone());
        Ok(self.response.clone())
    }
}

/// Reporter wired to a recording client
pub fn reporter(tokens: &[&str]) -> (ResultsReporter, Arc<RecordingClient>) {
    let client = RecordingClient::new();
    let reporter = ResultsReporter::new(client.clone(), tokens.iter().copied());
    (reporter, client)
}
