//! JSON builders for hand-written traces.

#![allow(dead_code)]

use serde_json::{json, Value};
use vm_trace_studio::analysis::{normalize, NormalizeOptions, NormalizedTrace};
use vm_trace_studio::parser::RawEvent;

pub fn open_frame(id: u64, name: &str, params: Vec<Value>, locals: &[&str]) -> Value {
    json!({"OpenFrame": {
        "frame": {
            "binary_member_index": 0,
            "frame_id": id,
            "function_name": name,
            "is_native": false,
            "module": {"address": "0x2", "name": "demo"},
            "locals_types": locals.iter().map(|t| json!({"type_": t, "ref_type": null})).collect::<Vec<_>>(),
            "parameters": params.into_iter().map(|value| json!({"RuntimeValue": {"value": value}})).collect::<Vec<_>>(),
            "return_types": [],
            "type_instantiation": []
        },
        "gas_left": 1000
    }})
}

pub fn instruction(pc: u64) -> Value {
    json!({"Instruction": {"type_parameters": [], "pc": pc, "gas_left": 1000, "instruction": "NOP"}})
}

pub fn write_local(frame_id: u64, index: u64, value: Value) -> Value {
    json!({"Effect": {"Write": {
        "location": {"Local": [frame_id, index]},
        "root_value_after_write": {"RuntimeValue": {"value": value}}
    }}})
}

pub fn read_local(frame_id: u64, index: u64, value: Value) -> Value {
    json!({"Effect": {"Read": {
        "location": {"Local": [frame_id, index]},
        "root_value_read": {"RuntimeValue": {"value": value}},
        "moved": false
    }}})
}

pub fn write_indexed(frame_id: u64, index: u64, offset: u64, value: Value) -> Value {
    json!({"Effect": {"Write": {
        "location": {"Indexed": [{"Local": [frame_id, index]}, offset]},
        "root_value_after_write": {"RuntimeValue": {"value": value}}
    }}})
}

pub fn close_frame(id: u64, returns: Vec<Value>) -> Value {
    json!({"CloseFrame": {
        "frame_id": id,
        "return_": returns.into_iter().map(|value| json!({"RuntimeValue": {"value": value}})).collect::<Vec<_>>(),
        "gas_left": 900
    }})
}

pub fn trace_document(events: Vec<Value>) -> Value {
    json!({"version": 1, "events": events})
}

pub fn raw_events(events: Vec<Value>) -> Vec<RawEvent> {
    events
        .into_iter()
        .map(|event| serde_json::from_value(event).expect("test event must match the raw schema"))
        .collect()
}

pub fn normalize_json(events: Vec<Value>) -> NormalizedTrace {
    normalize(raw_events(events), &NormalizeOptions::default()).expect("trace should normalize")
}
