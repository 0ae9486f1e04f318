// Results reporter - builds case records and uploads them when the run ends

use super::{Reporter, RunOutcome, build};
use crate::diagnostics::{Diagnostics, Fault, FaultKind};
use crate::events::{CaseResultInfo, CaseStartInfo, RunEndInfo, RunStartInfo};
use crate::settings::{LaunchSettings, TARGET_KEY};
use crate::state::{CaseResult, CaseResults, Metadata, RunPayload, TestCase, derive_suite};
use crate::supplemental::{Annotations, Annotator, CaseHandle};
use crate::upload::ResultsClient;
use crate::utils::FileUtils;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

const DEFAULT_FRAMEWORK: &str = "unspecified";

/// Per-run state, replaced by every run start
#[derive(Debug, Default)]
struct RunState {
    /// `None` until the run starts, and while disabled
    settings: Option<LaunchSettings>,
    framework: String,
    start_times: HashMap<String, i64>,
    results: CaseResults,
}

/// Reporter that collects every case and uploads one payload per run
pub struct ResultsReporter {
    tokens: Vec<String>,
    integration_name: String,
    client: Arc<dyn ResultsClient>,
    run: Mutex<RunState>,
    annotations: Arc<Annotations>,
    diagnostics: Arc<Diagnostics>,
}

impl ResultsReporter {
    /// Create a reporter that reads its settings from `tokens` when the run starts
    pub fn new<I, S>(client: Arc<dyn ResultsClient>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let diagnostics = Arc::new(Diagnostics::new());
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            integration_name: crate::config::default_integration_name(),
            client,
            run: Mutex::new(RunState::default()),
            annotations: Arc::new(Annotations::new(diagnostics.clone())),
            diagnostics,
        }
    }

    /// Create a reporter that reads the process arguments
    pub fn from_env(client: Arc<dyn ResultsClient>) -> Self {
        Self::new(client, std::env::args().skip(1))
    }

    pub fn with_integration_name(mut self, name: impl Into<String>) -> Self {
        self.integration_name = name.into();
        self
    }

    fn state(&self) -> MutexGuard<'_, RunState> {
        // Callbacks never panic while holding the lock, so a poisoned state is still consistent.
        self.run.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// True between a run start with a target and the next run start
    pub fn is_enabled(&self) -> bool {
        self.annotations.is_enabled()
    }

    /// Annotations routed to the case currently executing
    pub fn annotator(&self) -> Annotator {
        Annotator::new(self.annotations.clone())
    }

    /// Handle for an explicit case id
    pub fn case(&self, id: &str) -> CaseHandle {
        CaseHandle::new(id, self.annotations.clone())
    }

    /// Cases finished so far in the current run
    pub fn results(&self) -> CaseResults {
        self.state().results.clone()
    }

    /// Faults swallowed during the current run
    pub fn faults(&self) -> Vec<Fault> {
        self.diagnostics.faults()
    }

    /// Attachments under `<root>/<suite>/<name>/`; any failure counts as none
    fn attachments(&self, root: Option<&Path>, suite: &str, name: &str, case_id: Option<&str>) -> Vec<String> {
        let Some(root) = root else {
            return Vec::new();
        };
        match FileUtils::case_files(root, suite, name) {
            Ok(files) => files,
            Err(e) => {
                self.diagnostics
                    .record(FaultKind::Attachments, case_id, format!("Error reading case files: {}", e));
                Vec::new()
            }
        }
    }

    /// Serialize a runner-supplied array. Anything else, or a failure, yields `None`.
    fn serialize_array(&self, value: Option<&Value>, field: &str, case_id: &str) -> Option<String> {
        let value = value.filter(|v| v.is_array())?;
        match serde_json::to_string(value) {
            Ok(text) => Some(text),
            Err(e) => {
                self.diagnostics.record(
                    FaultKind::Serialization,
                    Some(case_id),
                    format!("unable to save {}: {}", field, e),
                );
                None
            }
        }
    }

    /// Case record from the runner's result, before timing and supplemental data
    fn case_from_result(&self, info: &CaseResultInfo, settings: &LaunchSettings) -> TestCase {
        let name = info.description.trim();
        let mut case = TestCase::new(name, derive_suite(&info.full_name, name));
        case.duration = info.duration_ms();
        case.raw_result = Some(info.status.clone());

        let arrays = [
            ("Passed expectations", info.passed_expectations.as_ref()),
            ("Deprecation warnings", info.deprecation_warnings.as_ref()),
            ("Debug logs", info.debug_logs.as_ref()),
        ];
        for (field, value) in arrays {
            if let Some(text) = self.serialize_array(value, field, &info.id) {
                case.set_custom(field, Value::String(text));
            }
        }

        if let Some(properties) = &info.properties {
            for (key, value) in properties {
                case.set_custom(key, value.clone());
            }
        }

        if let Some(reason) = &info.pending_reason {
            case.set_custom("Pending reason", json!(reason));
        }

        case.result = CaseResult::from_status(&info.status);
        if case.result == CaseResult::Fail {
            case.reason = self.serialize_array(info.failed_expectations.as_ref(), "failure reason", &info.id);
        }

        let files = self.attachments(settings.files.as_deref(), &case.suite, &case.name, Some(&info.id));
        case.add_files(files);

        case
    }
}

#[async_trait]
impl Reporter for ResultsReporter {
    fn on_run_start(&self, info: &RunStartInfo) {
        let mut state = self.state();
        *state = RunState::default();
        self.annotations.reset();
        self.diagnostics.clear();

        let settings = LaunchSettings::from_tokens(&self.tokens);
        if !settings.is_enabled() {
            info!("{} not provided. Reporting disabled.", TARGET_KEY);
            self.annotations.set_enabled(false);
            return;
        }

        state.framework = info
            .framework
            .clone()
            .unwrap_or_else(|| DEFAULT_FRAMEWORK.to_string());
        debug!(
            framework = %state.framework,
            files = ?settings.files,
            build = ?settings.build_name,
            "results reporting enabled"
        );
        state.settings = Some(settings);
        self.annotations.set_enabled(true);
    }

    fn on_case_start(&self, info: &CaseStartInfo) -> CaseHandle {
        let handle = self.case(&info.id);
        if !self.is_enabled() {
            return handle;
        }

        self.state()
            .start_times
            .insert(info.id.clone(), crate::time::now_unix_millis());
        self.annotations.context.push(&info.id);
        handle
    }

    fn on_case_end(&self, info: &CaseResultInfo) {
        if !self.is_enabled() {
            return;
        }
        let Some(settings) = self.state().settings.clone() else {
            return;
        };

        let mut case = self.case_from_result(info, &settings);

        let mut state = self.state();
        case.start = state.start_times.get(&info.id).copied();
        case.end = Some(crate::time::now_unix_millis());
        if case.start.is_none() {
            debug!(case_id = %info.id, "case finished without a start event");
        }

        if let Some(entry) = self.annotations.store.take(&info.id) {
            entry.apply_to(&mut case);
        }
        self.annotations.context.finish(&info.id);

        debug!(case_id = %info.id, suite = %case.suite, name = %case.name, result = %case.result, "case finished");
        state.results.add(case);
    }

    async fn on_run_end(&self, info: &RunEndInfo) -> RunOutcome {
        if !self.is_enabled() {
            return RunOutcome::Disabled;
        }

        let payload = {
            let Some(settings) = self.state().settings.clone() else {
                return RunOutcome::Disabled;
            };

            if let Some(mut case) = build::build_case(&settings) {
                let files = self.attachments(settings.files.as_deref(), &case.suite, &case.name, None);
                case.add_files(files);
                self.state().results.add(case);
            }

            let state = self.state();
            let target = settings.target.clone().unwrap_or_default();
            RunPayload::new(
                target,
                state.results.clone(),
                Metadata::new(&self.integration_name, &state.framework),
            )
        };

        let cases = payload.results.total();
        debug!(
            overall_status = ?info.overall_status,
            cases,
            passed = payload.results.passed(),
            failed = payload.results.failed(),
            unknown = payload.results.unknown(),
            "run finished"
        );
        info!(at = %crate::time::now_rfc3339(), "Results upload...");

        match self.client.upload(&payload).await {
            Ok(response) => {
                info!("Success: {}", response.success);
                info!("Message: {}", response.message);
                info!("Warnings: {}", response.warnings.len());
                info!("Errors: {}", response.errors.len());
                for warning in &response.warnings {
                    warn!("{}", warning);
                }
                RunOutcome::Uploaded { cases, response }
            }
            Err(e) => {
                error!("Results library error, failed to upload.");
                self.diagnostics.record(FaultKind::Upload, None, e.to_string());
                RunOutcome::UploadFailed {
                    cases,
                    error: e.to_string(),
                }
            }
        }
    }
}
