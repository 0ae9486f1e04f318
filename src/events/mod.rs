// Runner events - callback payloads and their newline-delimited JSON form

pub mod stream;

pub use stream::read_events;

use crate::state::Step;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Run started
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStartInfo {
    /// Name of the test framework driving the run
    #[serde(default)]
    pub framework: Option<String>,
}

/// Case started
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStartInfo {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

impl CaseStartInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Case finished, as reported by the runner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResultInfo {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub full_name: String,
    /// Milliseconds
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub passed_expectations: Option<Value>,
    #[serde(default)]
    pub deprecation_warnings: Option<Value>,
    #[serde(default)]
    pub debug_logs: Option<Value>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub pending_reason: Option<String>,
    #[serde(default)]
    pub failed_expectations: Option<Value>,
}

impl CaseResultInfo {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        full_name: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            full_name: full_name.into(),
            status: status.into(),
            ..Self::default()
        }
    }

    /// Duration rounded to whole milliseconds
    pub fn duration_ms(&self) -> Option<u64> {
        self.duration
            .filter(|d| d.is_finite())
            .map(|d| d.max(0.0).round() as u64)
    }
}

/// Run finished
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunEndInfo {
    #[serde(default)]
    pub overall_status: Option<String>,
}

/// One line of a recorded run. Annotation events without an `id` go to the
/// case currently executing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunnerEvent {
    RunStart(RunStartInfo),
    CaseStart(CaseStartInfo),
    CaseEnd(CaseResultInfo),
    RunEnd(RunEndInfo),
    AttachFile {
        #[serde(default)]
        id: Option<String>,
        path: String,
    },
    SetCustom {
        #[serde(default)]
        id: Option<String>,
        name: String,
        #[serde(default)]
        value: Value,
    },
    SetDescription {
        #[serde(default)]
        id: Option<String>,
        text: String,
    },
    AddStep {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        step: Option<Step>,
    },
}

/// Runners hand out numeric or string ids; both become strings.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
