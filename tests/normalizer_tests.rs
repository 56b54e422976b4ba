mod common;

use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use vm_trace_studio::analysis::{normalize, EventNormalizer, NormalizeOptions};
use vm_trace_studio::model::{LifetimeEnd, ModuleInfo, RuntimeValue, TraceEffect, TraceEvent, TraceLocation};
use vm_trace_studio::utils::config::FRAME_LIFETIME;
use vm_trace_studio::utils::{ErrorCategory, TraceError};

#[test]
fn test_single_write_scenario() {
    let events = raw_events(vec![
        open_frame(1, "main", vec![json!(42)], &["u64"]),
        instruction(0),
        write_local(1, 0, json!(43)),
        instruction(1),
        close_frame(1, vec![]),
    ]);

    let mut normalizer = EventNormalizer::new(NormalizeOptions::default());
    let mut events = events.into_iter().enumerate();
    for (index, raw) in events.by_ref().take(3) {
        normalizer.push(index, raw).unwrap();
    }
    // right after the write the local is alive until frame close
    assert_eq!(normalizer.lifetimes().row(1), Some(&[Some(FRAME_LIFETIME)][..]));

    for (index, raw) in events {
        normalizer.push(index, raw).unwrap();
    }
    let trace = normalizer.finish();

    assert_eq!(
        trace.events,
        vec![
            TraceEvent::OpenFrame {
                id: 1,
                name: "main".to_string(),
                module: ModuleInfo {
                    address: "0x2".to_string(),
                    name: "demo".to_string(),
                },
                is_native: false,
                local_types: vec!["u64".to_string()],
                type_instantiation: vec![],
                param_values: vec![RuntimeValue::scalar("42")],
            },
            TraceEvent::Instruction {
                pc: 0,
                instruction: "NOP".to_string(),
                gas_left: 1000,
            },
            TraceEvent::Effect(TraceEffect::Write {
                location: TraceLocation::Local {
                    frame_id: 1,
                    local_index: 0,
                },
                value: RuntimeValue::scalar("43"),
            }),
            TraceEvent::Instruction {
                pc: 1,
                instruction: "NOP".to_string(),
                gas_left: 1000,
            },
            TraceEvent::CloseFrame {
                id: 1,
                return_values: vec![],
            },
        ]
    );
    assert_eq!(trace.local_lifetime_ends.get(&1), Some(&vec![Some(LifetimeEnd::Pc(1))]));
    assert!(!trace.stats.has_warnings());
}

#[test]
fn test_indexed_effect_on_caller_frame_is_dropped() {
    let trace = normalize_json(vec![
        open_frame(1, "outer", vec![json!([1, 2])], &["vector<u64>"]),
        instruction(0),
        open_frame(2, "inner", vec![], &["vector<u64>"]),
        instruction(0),
        write_indexed(1, 0, 1, json!([1, 9])),
        write_indexed(2, 0, 0, json!([5])),
        instruction(1),
        close_frame(2, vec![]),
        instruction(1),
        close_frame(1, vec![]),
    ]);

    let writes = trace.events.iter().filter(|e| e.is_write()).count();
    assert_eq!(writes, 1);
    assert_eq!(trace.stats.unresolved_effects, 1);
    assert_eq!(trace.stats.warnings().len(), 1);
}

#[test]
fn test_local_effect_on_caller_frame_updates_caller() {
    let trace = normalize_json(vec![
        open_frame(1, "outer", vec![json!(0)], &["u64"]),
        instruction(0),
        instruction(1),
        open_frame(2, "inner", vec![], &[]),
        instruction(0),
        write_local(1, 0, json!(7)),
        instruction(1),
        close_frame(2, vec![]),
        close_frame(1, vec![]),
    ]);

    assert_eq!(trace.stats.writes, 1);
    // no instruction of frame 1 ran after the write
    assert_eq!(trace.lifetime_end(1, 0), Some(FRAME_LIFETIME));
}

#[test]
fn test_effect_on_closed_frame_is_unresolved() {
    let trace = normalize_json(vec![
        open_frame(1, "outer", vec![], &[]),
        open_frame(2, "inner", vec![], &[]),
        close_frame(2, vec![]),
        write_local(2, 0, json!(1)),
        close_frame(1, vec![]),
    ]);

    assert_eq!(trace.stats.writes, 0);
    assert_eq!(trace.stats.unresolved_effects, 1);
}

#[test]
fn test_out_of_range_local_is_unresolved() {
    let trace = normalize_json(vec![
        open_frame(1, "main", vec![], &["u64"]),
        instruction(0),
        write_local(1, u64::MAX, json!(1)),
        read_local(1, 4_000_000_000, json!(1)),
        write_local(1, 1, json!(1)),
        write_local(1, 0, json!(2)),
        instruction(1),
        close_frame(1, vec![]),
    ]);

    assert_eq!(trace.stats.writes, 1);
    assert_eq!(trace.stats.unresolved_effects, 3);
    assert_eq!(trace.local_lifetime_ends.get(&1), Some(&vec![Some(LifetimeEnd::Pc(1))]));
    assert!(trace.stats.has_warnings());
}

#[test]
fn test_reads_only_emitted_on_request() {
    let events = vec![
        open_frame(1, "main", vec![json!(3)], &["u64"]),
        instruction(0),
        read_local(1, 0, json!(3)),
        instruction(1),
        close_frame(1, vec![]),
    ];

    let quiet = normalize(raw_events(events.clone()), &NormalizeOptions::default()).unwrap();
    assert!(quiet.events.iter().all(|e| e.kind() != "Read"));
    assert_eq!(quiet.stats.reads, 1);

    let verbose = normalize(raw_events(events), &NormalizeOptions::default().with_reads(true)).unwrap();
    assert_eq!(verbose.events.iter().filter(|e| e.kind() == "Read").count(), 1);

    // read visibility does not change lifetimes
    assert_eq!(quiet.local_lifetime_ends, verbose.local_lifetime_ends);
}

#[test]
fn test_stack_effects_and_errors() {
    let trace = normalize_json(vec![
        open_frame(1, "main", vec![], &[]),
        instruction(0),
        json!({"Effect": {"Push": {"RuntimeValue": {"value": 1}}}}),
        json!({"Effect": {"Pop": {"RuntimeValue": {"value": 1}}}}),
        json!({"Effect": {"ExecutionError": "ARITHMETIC_ERROR"}}),
        close_frame(1, vec![]),
    ]);

    assert_eq!(trace.stats.skipped_effects, 2);
    assert_eq!(trace.stats.execution_errors, 1);
    assert!(trace.events.contains(&TraceEvent::Effect(TraceEffect::ExecutionError(
        "ARITHMETIC_ERROR".to_string()
    ))));
}

#[test]
fn test_return_values_and_reference_params() {
    let trace = normalize_json(vec![
        json!({"OpenFrame": {"frame": {
            "frame_id": 4,
            "function_name": "borrow_it",
            "is_native": false,
            "module": {"address": "0x2", "name": "demo"},
            "locals_types": [{"type_": "u64", "ref_type": "Imm"}],
            "parameters": [{"ImmRef": {"location": {"Local": [1, 0]}, "snapshot": 11}}],
            "type_instantiation": ["u64"]
        }, "gas_left": 10}}),
        instruction(0),
        close_frame(4, vec![json!(12)]),
    ]);

    let TraceEvent::OpenFrame {
        local_types,
        param_values,
        type_instantiation,
        ..
    } = &trace.events[0]
    else {
        panic!("first event must open a frame");
    };
    assert_eq!(local_types, &vec!["&u64".to_string()]);
    assert_eq!(type_instantiation, &vec!["u64".to_string()]);
    assert_eq!(param_values, &vec![RuntimeValue::scalar("11")]);

    assert_eq!(
        trace.events.last(),
        Some(&TraceEvent::CloseFrame {
            id: 4,
            return_values: vec![RuntimeValue::scalar("12")],
        })
    );
}

#[test]
fn test_close_of_wrong_frame_is_fatal() {
    let result = normalize(
        raw_events(vec![
            open_frame(1, "outer", vec![], &[]),
            open_frame(2, "inner", vec![], &[]),
            close_frame(1, vec![]),
        ]),
        &NormalizeOptions::default(),
    );

    let err = result.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Schema);
    assert_eq!(err.event_index(), Some(2));
    assert!(matches!(
        err,
        TraceError::StackMismatch {
            expected: Some(2),
            found: 1,
            ..
        }
    ));
}

#[test]
fn test_duplicate_open_frame_is_fatal() {
    let err = normalize(
        raw_events(vec![
            open_frame(1, "outer", vec![], &[]),
            open_frame(1, "again", vec![], &[]),
        ]),
        &NormalizeOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, TraceError::DuplicateFrame { index: 1, frame_id: 1 }));
}

#[test]
fn test_instruction_outside_frame_is_counted() {
    let trace = normalize_json(vec![instruction(0)]);
    assert_eq!(trace.events.len(), 1);
    assert_eq!(trace.stats.orphan_instructions, 1);
    assert!(trace.local_lifetime_ends.is_empty());
}
