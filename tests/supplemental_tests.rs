// Supplemental data: annotations made while a case runs end up on that case

mod common;

use common::reporter;
use results_reporter::diagnostics::FaultKind;
use results_reporter::events::{CaseResultInfo, CaseStartInfo, RunEndInfo, RunStartInfo};
use results_reporter::{Reporter, Step};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn finish(id: &str, name: &str) -> CaseResultInfo {
    CaseResultInfo::new(id, name, format!("Suite {}", name), "passed")
}

#[tokio::test]
async fn test_adjacent_steps_collapsed() {
    // Arrange
    let (reporter, client) = reporter(&["results-target=t"]);
    reporter.on_run_start(&RunStartInfo::default());
    let annotator = reporter.annotator();

    // Act
    reporter.on_case_start(&CaseStartInfo::new("spec1"));
    annotator.add_step(Step::new("a", "pass"));
    annotator.add_step(Step::new("a", "pass"));
    annotator.add_step(Step::new("b", "fail"));
    annotator.add_step(Step::new("b", "fail"));
    annotator.add_step(Step::new("b", "fail"));
    reporter.on_case_end(&finish("spec1", "steps"));
    reporter.on_run_end(&RunEndInfo::default()).await;

    // Assert
    let payload = client.last();
    let steps = payload.cases()[0].steps.clone().expect("steps merged");
    let pairs: Vec<_> = steps.iter().map(|s| (s.name.as_str(), s.result.clone())).collect();
    assert_eq!(pairs, vec![("a", json!("pass")), ("b", json!("fail"))]);
}

#[tokio::test]
async fn test_repeated_file_annotation_deduplicated() {
    // Arrange
    let (reporter, client) = reporter(&["results-target=t"]);
    reporter.on_run_start(&RunStartInfo::default());

    // Act
    let handle = reporter.on_case_start(&CaseStartInfo::new("spec1"));
    handle.attach_file("/x/1.png");
    handle.attach_file("/x/1.png");
    reporter.on_case_end(&finish("spec1", "files"));
    reporter.on_run_end(&RunEndInfo::default()).await;

    // Assert
    assert_eq!(
        client.last().cases()[0].files,
        Some(vec!["/x/1.png".to_string()])
    );
}

#[tokio::test]
async fn test_annotated_files_follow_scanned_files() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let case_dir = temp.path().join("Suite").join("files");
    fs::create_dir_all(&case_dir).unwrap();
    fs::write(case_dir.join("scan.txt"), "scanned").unwrap();
    let scanned = std::path::absolute(case_dir.join("scan.txt"))
        .unwrap()
        .to_string_lossy()
        .into_owned();

    let files_arg = format!("results-files={}", temp.path().display());
    let (reporter, client) = reporter(&["results-target=t", files_arg.as_str()]);
    reporter.on_run_start(&RunStartInfo::default());

    // Act
    let handle = reporter.on_case_start(&CaseStartInfo::new("spec1"));
    handle.attach_file("/x/extra.png");
    handle.attach_file(&scanned);
    reporter.on_case_end(&finish("spec1", "files"));
    reporter.on_run_end(&RunEndInfo::default()).await;

    // Assert
    assert_eq!(
        client.last().cases()[0].files,
        Some(vec![scanned, "/x/extra.png".to_string()])
    );
}

#[tokio::test]
async fn test_custom_field_last_write_wins() {
    // Arrange
    let (reporter, client) = reporter(&["results-target=t"]);
    reporter.on_run_start(&RunStartInfo::default());

    // Act
    reporter.on_case_start(&CaseStartInfo::new("spec1"));
    reporter.annotator().set_custom("priority", "high");
    reporter.annotator().set_custom("priority", "high");
    reporter.on_case_end(&finish("spec1", "custom"));
    reporter.on_run_end(&RunEndInfo::default()).await;

    // Assert
    let payload = client.last();
    let case = &payload.cases()[0];
    assert_eq!(case.custom.len(), 1);
    assert_eq!(case.custom("priority"), Some(&json!("high")));
}

#[tokio::test]
async fn test_annotation_overrides_runner_property() {
    // Arrange
    let (reporter, client) = reporter(&["results-target=t"]);
    reporter.on_run_start(&RunStartInfo::default());
    let mut info = finish("spec1", "override");
    info.properties = json!({"owner": "runner"}).as_object().cloned();

    // Act
    let handle = reporter.on_case_start(&CaseStartInfo::new("spec1"));
    handle.set_custom("owner", "test body");
    handle.set_description("checks the override");
    reporter.on_case_end(&info);
    reporter.on_run_end(&RunEndInfo::default()).await;

    // Assert
    let payload = client.last();
    let case = &payload.cases()[0];
    assert_eq!(case.custom("owner"), Some(&json!("test body")));
    assert_eq!(case.desc.as_deref(), Some("checks the override"));
}

#[tokio::test]
async fn test_step_description_renamed() {
    // Arrange
    let (reporter, client) = reporter(&["results-target=t"]);
    reporter.on_run_start(&RunStartInfo::default());
    let step: Step = serde_json::from_value(json!({
        "name": "submit form",
        "result": "pass",
        "description": "clicks submit"
    }))
    .unwrap();

    // Act
    let handle = reporter.on_case_start(&CaseStartInfo::new("spec1"));
    handle.add_step(step);
    handle.add_step(None::<Step>);
    reporter.on_case_end(&finish("spec1", "steps"));
    reporter.on_run_end(&RunEndInfo::default()).await;

    // Assert
    let value = serde_json::to_value(client.last().cases()).unwrap();
    let steps = value[0]["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0]["desc"], "clicks submit");
    assert!(steps[0].get("description").is_none());
}

#[tokio::test]
async fn test_explicit_handle_survives_cursor_moving_on() {
    // Arrange
    let (reporter, client) = reporter(&["results-target=t"]);
    reporter.on_run_start(&RunStartInfo::default());

    // Act
    let first = reporter.on_case_start(&CaseStartInfo::new("spec1"));
    reporter.on_case_start(&CaseStartInfo::new("spec2"));
    first.set_description("belongs to the first case");
    reporter.annotator().set_description("belongs to the second case");
    reporter.on_case_end(&finish("spec2", "second"));
    reporter.annotator().attach_file("/x/first.log");
    reporter.on_case_end(&finish("spec1", "first"));
    reporter.on_run_end(&RunEndInfo::default()).await;

    // Assert
    let payload = client.last();
    let second = &payload.cases()[0];
    let first = &payload.cases()[1];
    assert_eq!(second.desc.as_deref(), Some("belongs to the second case"));
    assert_eq!(first.desc.as_deref(), Some("belongs to the first case"));
    assert_eq!(first.files, Some(vec!["/x/first.log".to_string()]));
}

#[tokio::test]
async fn test_annotation_between_cases_dropped_with_fault() {
    // Arrange
    let (reporter, client) = reporter(&["results-target=t"]);
    reporter.on_run_start(&RunStartInfo::default());

    // Act
    reporter.on_case_start(&CaseStartInfo::new("spec1"));
    reporter.on_case_end(&finish("spec1", "first"));
    reporter.annotator().set_custom("stray", true);
    reporter.on_case_start(&CaseStartInfo::new("spec2"));
    reporter.on_case_end(&finish("spec2", "second"));
    reporter.on_run_end(&RunEndInfo::default()).await;

    // Assert
    let payload = client.last();
    assert!(payload.cases().iter().all(|c| c.custom.is_empty()));
    let faults = reporter.faults();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].kind, FaultKind::Annotation);
}
