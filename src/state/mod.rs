// State module - case records and the upload payload

pub mod payload;
pub mod result;

pub use payload::{Metadata, RunPayload};
pub use result::{BUILD_SUITE, Step, TestCase, derive_suite};

use serde::{Deserialize, Serialize};

/// Ordered list of finished cases for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseResults {
    cases: Vec<TestCase>,
}

impl CaseResults {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished case
    pub fn add(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    /// Get total cases
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    /// Get passed cases
    pub fn passed(&self) -> usize {
        self.count(CaseResult::Pass)
    }

    /// Get failed cases
    pub fn failed(&self) -> usize {
        self.count(CaseResult::Fail)
    }

    /// Get cases with neither outcome
    pub fn unknown(&self) -> usize {
        self.count(CaseResult::Unknown)
    }

    fn count(&self, result: CaseResult) -> usize {
        self.cases.iter().filter(|c| c.result == result).count()
    }

    /// Get all cases
    pub fn all(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Case outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CaseResult {
    Pass,
    Fail,
    #[default]
    Unknown,
}

impl CaseResult {
    /// Map a runner status string (`passed`, `failed`, ...) to an outcome
    pub fn from_status(status: &str) -> Self {
        match status {
            "passed" => Self::Pass,
            "failed" => Self::Fail,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Unknown => "unknown",
        }
    }
}

/// Case-insensitive `pass` / `fail`; anything else is unknown.
impl From<&str> for CaseResult {
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "pass" => Self::Pass,
            "fail" => Self::Fail,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for CaseResult {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl std::fmt::Display for CaseResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
