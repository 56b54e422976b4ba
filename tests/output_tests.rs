mod common;

use common::*;
use serde_json::json;
use std::path::Path;
use vm_trace_studio::commands::{execute_inspect, render_summary, validate_args, InspectArgs};
use vm_trace_studio::model::LifetimeEnd;
use vm_trace_studio::output::{read_report, to_report, validate_path, write_report, TraceReport};
use vm_trace_studio::utils::config::REPORT_SCHEMA_VERSION;

fn sample_events() -> Vec<serde_json::Value> {
    vec![
        open_frame(1, "main", vec![json!(1)], &["u64", "bool"]),
        instruction(0),
        open_frame(2, "helper", vec![], &[]),
        instruction(0),
        write_indexed(1, 0, 0, json!([0])),
        close_frame(2, vec![]),
        write_local(1, 1, json!(true)),
        close_frame(1, vec![]),
    ]
}

fn create_test_report(include_events: bool) -> TraceReport {
    let trace = normalize_json(sample_events());
    to_report("sample.json", &trace, include_events)
}

#[test]
fn test_report_summarizes_frames() {
    let report = create_test_report(false);

    assert_eq!(report.version, REPORT_SCHEMA_VERSION);
    assert_eq!(report.frames.len(), 2);
    assert_eq!(report.frames[0].function, "0x2::demo::main");
    assert_eq!(report.frames[0].locals.len(), 2);
    assert_eq!(report.frames[0].locals[0].type_name.as_deref(), Some("u64"));
    assert_eq!(report.frames[0].locals[0].lifetime_end, Some(LifetimeEnd::Pc(0)));
    assert_eq!(report.frames[0].locals[1].lifetime_end, Some(LifetimeEnd::Frame));
    assert_eq!(report.event_counts.get("OpenFrame"), Some(&2));
    assert_eq!(report.warnings.len(), 1);
    assert!(report.events.is_none());
}

#[test]
fn test_write_and_read_report() {
    let report = create_test_report(true);
    let temp_file = tempfile::NamedTempFile::new().unwrap();

    write_report(&report, temp_file.path()).unwrap();
    let loaded = read_report(temp_file.path()).unwrap();

    assert_eq!(loaded, report);
}

#[test]
fn test_write_creates_parent_dirs() {
    let report = create_test_report(false);
    let temp_dir = tempfile::tempdir().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("report.json");

    write_report(&report, &nested).unwrap();
    assert!(nested.exists());
}

#[test]
fn test_validate_output_path() {
    assert!(validate_path(Path::new("")).is_err());

    let temp_dir = tempfile::tempdir().unwrap();
    assert!(validate_path(temp_dir.path()).is_err());
}

#[test]
fn test_render_summary_lists_locals() {
    let summary = render_summary(&create_test_report(false));

    assert!(summary.contains("Frames: 2"));
    assert!(summary.contains("local 0: u64 (ends at pc 0)"));
    assert!(summary.contains("local 1: bool (until frame close)"));
    assert!(summary.contains("warning: 1 effect(s)"));
}

#[test]
fn test_inspect_command_writes_report() {
    let temp_dir = tempfile::tempdir().unwrap();
    let trace_path = temp_dir.path().join("trace.json");
    let report_path = temp_dir.path().join("report.json");
    std::fs::write(&trace_path, trace_document(sample_events()).to_string()).unwrap();

    let args = InspectArgs {
        trace_path,
        output_json: Some(report_path.clone()),
        include_events: true,
        emit_reads: false,
        print_summary: false,
    };
    validate_args(&args).unwrap();
    let report = execute_inspect(args).unwrap();

    let loaded = read_report(&report_path).unwrap();
    assert_eq!(loaded.frames, report.frames);
    assert_eq!(loaded.events.map(|events| events.len()), Some(7));
}

#[test]
fn test_inspect_rejects_missing_trace() {
    let args = InspectArgs {
        trace_path: "definitely/not/here.json".into(),
        ..InspectArgs::default()
    };
    assert!(validate_args(&args).is_err());
}
