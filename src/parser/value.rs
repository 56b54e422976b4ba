//! Decoding of raw trace values and type descriptors.
//!
//! Decoding is total: every JSON node maps to some `RuntimeValue`.

use super::schema::{RawLocalType, RawRefType, RawTraceValue};
use crate::model::{CompoundValue, RuntimeValue};
use serde_json::{Map, Value};

/// Decode one raw value node
///
/// **Public** - used by the normalizer for parameters, returns and effects
///
/// Scalars keep their textual form, so integers wider than 64 bits come
/// through digit-for-digit. Compound fields keep their declared order.
pub fn decode_value(raw: &Value) -> RuntimeValue {
    match raw {
        Value::Array(items) => RuntimeValue::Sequence(items.iter().map(decode_value).collect()),
        Value::Object(obj) => RuntimeValue::Compound(decode_compound(obj)),
        scalar => RuntimeValue::Scalar(scalar_text(scalar)),
    }
}

/// Decode a parameter, return value or effect payload
///
/// References decode to the snapshot of the value they point at.
pub fn decode_trace_value(raw: &RawTraceValue) -> RuntimeValue {
    match raw {
        RawTraceValue::RuntimeValue { value } => decode_value(value),
        RawTraceValue::MutRef { snapshot, .. } | RawTraceValue::ImmRef { snapshot, .. } => {
            decode_value(snapshot)
        }
    }
}

/// **Private** - struct or enum node
fn decode_compound(obj: &Map<String, Value>) -> CompoundValue {
    let fields = obj
        .get("fields")
        .and_then(Value::as_object)
        .map(|fields| {
            fields
                .iter()
                .map(|(name, value)| (name.clone(), decode_value(value)))
                .collect()
        })
        .unwrap_or_default();

    CompoundValue {
        fields,
        type_name: obj.get("type").map(scalar_text).unwrap_or_default(),
        variant_name: obj
            .get("variant_name")
            .and_then(Value::as_str)
            .map(str::to_string),
        variant_tag: obj.get("variant_tag").and_then(Value::as_u64),
    }
}

/// Uniform text for a leaf node
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Render a local's declared type, including its reference kind
pub fn render_local_type(local: &RawLocalType) -> String {
    let base = render_type(&local.type_);
    match local.ref_type {
        Some(RawRefType::Mut) => format!("&mut {}", base),
        Some(RawRefType::Imm) => format!("&{}", base),
        None => base,
    }
}

/// Render a type tag
///
/// Handles `"u64"`, `{"vector": T}` and
/// `{"struct": {"address", "module", "name", "type_args"}}`; anything else
/// falls back to its JSON text.
pub fn render_type(type_tag: &Value) -> String {
    match type_tag {
        Value::String(s) => s.clone(),
        Value::Object(obj) if obj.len() == 1 => {
            if let Some(inner) = obj.get("vector") {
                format!("vector<{}>", render_type(inner))
            } else if let Some(Value::Object(tag)) = obj.get("struct") {
                render_struct_tag(tag)
            } else {
                type_tag.to_string()
            }
        }
        other => other.to_string(),
    }
}

/// **Private** - `address::module::Name<Args>`
fn render_struct_tag(tag: &Map<String, Value>) -> String {
    let part = |key: &str| tag.get(key).map(scalar_text).unwrap_or_default();
    let mut rendered = format!("{}::{}::{}", part("address"), part("module"), part("name"));

    let type_args: Vec<String> = tag
        .get("type_args")
        .and_then(Value::as_array)
        .map(|args| args.iter().map(render_type).collect())
        .unwrap_or_default();
    if !type_args.is_empty() {
        rendered.push('<');
        rendered.push_str(&type_args.join(", "));
        rendered.push('>');
    }

    rendered
}
