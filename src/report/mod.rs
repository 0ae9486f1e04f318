// Report module - runner lifecycle listeners

pub mod build;
pub mod results;

pub use results::ResultsReporter;

use crate::events::{CaseResultInfo, CaseStartInfo, RunEndInfo, RunStartInfo};
use crate::supplemental::CaseHandle;
use crate::upload::UploadResponse;
use async_trait::async_trait;

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// No destination target was configured; nothing was built or sent
    Disabled,
    /// Payload reached the service, which answered with `response`
    Uploaded { cases: usize, response: UploadResponse },
    /// Upload client failed; the run still completes
    UploadFailed { cases: usize, error: String },
}

impl RunOutcome {
    /// Number of cases in the payload, zero when disabled
    pub fn cases(&self) -> usize {
        match self {
            RunOutcome::Disabled => 0,
            RunOutcome::Uploaded { cases, .. } | RunOutcome::UploadFailed { cases, .. } => *cases,
        }
    }
}

/// Reporter trait
///
/// Callbacks arrive in order: run start, then for each case start, any
/// annotations, end, and finally run end.
#[async_trait]
pub trait Reporter: Send + Sync {
    /// Called when the run starts
    fn on_run_start(&self, info: &RunStartInfo);

    /// Called when a case starts. The handle annotates that case.
    fn on_case_start(&self, info: &CaseStartInfo) -> CaseHandle;

    /// Called when a case finishes
    fn on_case_end(&self, info: &CaseResultInfo);

    /// Called when the run finishes. Resolves once, after the upload answers.
    async fn on_run_end(&self, info: &RunEndInfo) -> RunOutcome;
}
