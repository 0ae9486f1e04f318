// Case records

use crate::state::CaseResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Suite name of the synthetic build case
pub const BUILD_SUITE: &str = "[build]";

/// One reported result.
///
/// Custom fields live in `custom` with their `_` prefix already applied and are
/// flattened into the record when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub name: String,
    pub suite: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    pub result: CaseResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
    #[serde(flatten)]
    pub custom: BTreeMap<String, Value>,
}

impl TestCase {
    pub fn new(name: impl Into<String>, suite: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suite: suite.into(),
            ..Self::default()
        }
    }

    /// Synthetic record for the whole build. An empty name becomes `-`.
    pub fn build(name: &str, result: Option<&str>) -> Self {
        let name = if name.is_empty() { "-" } else { name };
        Self {
            result: result.map(CaseResult::from).unwrap_or_default(),
            ..Self::new(name, BUILD_SUITE)
        }
    }

    /// Store a custom field under `_<name>`. A later write replaces an earlier one.
    pub fn set_custom(&mut self, name: &str, value: Value) {
        self.custom.insert(custom_key(name), value);
    }

    pub fn custom(&self, name: &str) -> Option<&Value> {
        self.custom.get(&custom_key(name))
    }

    /// Attach files, skipping paths the case already carries
    pub fn add_files<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut merged = self.files.take().unwrap_or_default();
        for file in files {
            if !merged.contains(&file) {
                merged.push(file);
            }
        }
        self.files = (!merged.is_empty()).then_some(merged);
    }

    /// Append steps, collapsing each run of adjacent steps that share name and result
    pub fn add_steps<I>(&mut self, steps: I)
    where
        I: IntoIterator<Item = Step>,
    {
        let mut merged = self.steps.take().unwrap_or_default();
        for step in steps {
            let repeated = merged
                .last()
                .is_some_and(|last| last.name == step.name && last.result == step.result);
            if !repeated {
                merged.push(step);
            }
        }
        self.steps = (!merged.is_empty()).then_some(merged);
    }
}

/// Prefix a custom field name with `_`
pub fn custom_key(name: &str) -> String {
    format!("_{}", name)
}

/// Split a runner's full name into its suite part.
///
/// Both inputs are trimmed. When the full name ends with the case name the
/// suffix is removed and the remainder trimmed; otherwise the whole trimmed
/// full name is the suite.
pub fn derive_suite(full_name: &str, name: &str) -> String {
    let full_name = full_name.trim();
    let name = name.trim();

    match full_name.strip_suffix(name) {
        Some(suite) if !name.is_empty() => suite.trim().to_string(),
        _ => full_name.to_string(),
    }
}

/// A step recorded against a case. `result` is passed through as supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawStep")]
pub struct Step {
    pub name: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub result: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Any other fields supplied with the step
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Step {
    pub fn new(name: impl Into<String>, result: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            result: result.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.desc = Some(description.into());
        self
    }
}

/// Wire shape of a step. `description` is accepted and becomes `desc`.
#[derive(Deserialize)]
struct RawStep {
    #[serde(default)]
    name: String,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    desc: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawStep> for Step {
    fn from(raw: RawStep) -> Self {
        Self {
            name: raw.name,
            result: raw.result,
            desc: raw.description.or(raw.desc),
            extra: raw.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_derive_suite_strips_trailing_name() {
        assert_eq!(derive_suite("Calculator adds numbers", "adds numbers"), "Calculator");
        assert_eq!(derive_suite("  Outer Inner case  ", " case "), "Outer Inner");
    }

    #[test]
    fn test_derive_suite_name_not_at_end() {
        assert_eq!(derive_suite("case in Outer", "case"), "case in Outer");
        assert_eq!(derive_suite("Outer", "missing"), "Outer");
    }

    #[test]
    fn test_derive_suite_repeated_name_only_strips_last() {
        assert_eq!(derive_suite("works works", "works"), "works");
    }

    #[test]
    fn test_derive_suite_empty_name() {
        assert_eq!(derive_suite(" Suite ", ""), "Suite");
    }

    #[test]
    fn test_build_case_defaults() {
        let case = TestCase::build("", None);
        assert_eq!(case.name, "-");
        assert_eq!(case.suite, BUILD_SUITE);
        assert_eq!(case.result, CaseResult::Unknown);

        let case = TestCase::build("1.2.0", Some("Pass"));
        assert_eq!(case.name, "1.2.0");
        assert_eq!(case.result, CaseResult::Pass);

        let case = TestCase::build("1.2.0", Some("broken"));
        assert_eq!(case.result, CaseResult::Unknown);
    }

    #[test]
    fn test_add_steps_collapses_adjacent_only() {
        let mut case = TestCase::new("n", "s");
        case.add_steps([
            Step::new("a", "pass"),
            Step::new("a", "pass"),
            Step::new("b", "fail"),
            Step::new("b", "fail"),
            Step::new("b", "fail"),
            Step::new("a", "pass"),
        ]);

        let names: Vec<_> = case
            .steps
            .unwrap()
            .iter()
            .map(|s| (s.name.clone(), s.result.clone()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("a".to_string(), json!("pass")),
                ("b".to_string(), json!("fail")),
                ("a".to_string(), json!("pass")),
            ]
        );
    }

    #[test]
    fn test_add_steps_same_name_different_result_kept() {
        let mut case = TestCase::new("n", "s");
        case.add_steps([Step::new("a", "pass"), Step::new("a", "fail")]);
        assert_eq!(case.steps.unwrap().len(), 2);
    }

    #[test]
    fn test_add_steps_keeps_other_results_verbatim() {
        let steps: Vec<Step> = serde_json::from_value(json!([
            {"name": "a", "result": "skipped"},
            {"name": "a", "result": "blocked"},
            {"name": "a", "result": "blocked"}
        ]))
        .unwrap();

        let mut case = TestCase::new("n", "s");
        case.add_steps(steps);

        let value = serde_json::to_value(&case).unwrap();
        assert_eq!(
            value["steps"],
            json!([
                {"name": "a", "result": "skipped"},
                {"name": "a", "result": "blocked"}
            ])
        );
    }

    #[test]
    fn test_add_files_skips_existing() {
        let mut case = TestCase::new("n", "s");
        case.add_files(vec!["/x/1.png".to_string()]);
        case.add_files(vec!["/x/1.png".to_string(), "/x/2.png".to_string()]);
        assert_eq!(
            case.files,
            Some(vec!["/x/1.png".to_string(), "/x/2.png".to_string()])
        );
    }

    #[test]
    fn test_add_files_empty_leaves_none() {
        let mut case = TestCase::new("n", "s");
        case.add_files(Vec::new());
        assert!(case.files.is_none());
    }

    #[test]
    fn test_serialize_flattens_custom_fields() {
        let mut case = TestCase::new("adds", "Calculator");
        case.result = CaseResult::Fail;
        case.raw_result = Some("failed".to_string());
        case.set_custom("priority", json!("high"));

        let value = serde_json::to_value(&case).unwrap();
        assert_eq!(value["name"], "adds");
        assert_eq!(value["suite"], "Calculator");
        assert_eq!(value["result"], "fail");
        assert_eq!(value["rawResult"], "failed");
        assert_eq!(value["_priority"], "high");
        assert!(value.get("reason").is_none());
        assert!(value.get("files").is_none());
    }

    #[test]
    fn test_step_description_becomes_desc() {
        let step: Step = serde_json::from_value(json!({
            "name": "login",
            "result": "pass",
            "description": "user signs in",
            "screenshot": "a.png"
        }))
        .unwrap();

        assert_eq!(step.desc.as_deref(), Some("user signs in"));
        assert_eq!(step.extra.get("screenshot"), Some(&json!("a.png")));

        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["desc"], "user signs in");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_step_description_overrides_desc() {
        let step: Step = serde_json::from_value(json!({
            "name": "s",
            "desc": "old",
            "description": "new"
        }))
        .unwrap();
        assert_eq!(step.desc.as_deref(), Some("new"));
        assert!(step.result.is_null());
        assert!(serde_json::to_value(&step).unwrap().get("result").is_none());
    }
}
