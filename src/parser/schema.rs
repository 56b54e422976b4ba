//! Raw trace schema, exactly as the VM writes it.
//!
//! These types mirror the JSON document field-for-field. Nothing here is
//! interpreted; see `value`, `location` and the normalizer for that.

use crate::model::{FrameId, Pc};
use serde::Deserialize;
use serde_json::Value;

/// Top-level trace document
///
/// Both fields are optional at this layer so that a missing one can be
/// reported as a format problem rather than a generic JSON error.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTraceFile {
    #[serde(default)]
    pub version: Option<u64>,

    /// Events are kept as JSON until the version has been checked
    #[serde(default)]
    pub events: Option<Vec<Value>>,
}

/// One entry of the `events` array
#[derive(Debug, Clone, Deserialize)]
pub enum RawEvent {
    OpenFrame {
        frame: RawFrame,
        #[serde(default)]
        gas_left: u64,
    },

    Instruction {
        pc: Pc,
        #[serde(default)]
        instruction: String,
        #[serde(default)]
        gas_left: u64,
        #[serde(default)]
        type_parameters: Vec<Value>,
    },

    Effect(Box<RawEffect>),

    CloseFrame {
        frame_id: FrameId,
        #[serde(default)]
        return_: Vec<RawTraceValue>,
        #[serde(default)]
        gas_left: u64,
    },
}

/// Frame description carried by `OpenFrame`
#[derive(Debug, Clone, Deserialize)]
pub struct RawFrame {
    pub frame_id: FrameId,
    pub function_name: String,
    #[serde(default)]
    pub is_native: bool,
    pub module: RawModule,
    #[serde(default)]
    pub locals_types: Vec<RawLocalType>,
    #[serde(default)]
    pub parameters: Vec<RawTraceValue>,
    #[serde(default)]
    pub type_instantiation: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawModule {
    /// Usually a hex string, kept loose because some VMs emit numbers
    pub address: Value,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLocalType {
    pub type_: Value,
    #[serde(default)]
    pub ref_type: Option<RawRefType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RawRefType {
    Mut,
    Imm,
}

/// A value as it appears in parameters, return values and effects
#[derive(Debug, Clone, Deserialize)]
pub enum RawTraceValue {
    RuntimeValue { value: Value },
    MutRef { location: RawLocation, snapshot: Value },
    ImmRef { location: RawLocation, snapshot: Value },
}

/// Memory effect recorded while an instruction executes
#[derive(Debug, Clone, Deserialize)]
pub enum RawEffect {
    Write {
        location: RawLocation,
        root_value_after_write: RawTraceValue,
    },

    Read {
        location: RawLocation,
        root_value_read: RawTraceValue,
        #[serde(default)]
        moved: bool,
    },

    Push(Value),
    Pop(Value),
    DataLoad(Value),
    ExecutionError(String),
}

/// Effect location
///
/// Decoded by hand from JSON so that kinds this reader does not know about
/// land in `Unknown` instead of failing the whole event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum RawLocation {
    /// `{"Local": [frame_id, local_index]}`
    Local(FrameId, usize),

    /// `{"Indexed": [base, index]}`
    Indexed(Box<RawLocation>, usize),

    /// `{"Global": id}`
    Global(u64),

    Unknown(Value),
}

impl From<Value> for RawLocation {
    fn from(value: Value) -> Self {
        match parse_location(&value) {
            Some(location) => location,
            None => RawLocation::Unknown(value),
        }
    }
}

fn parse_location(value: &Value) -> Option<RawLocation> {
    let obj = value.as_object()?;
    if obj.len() != 1 {
        return None;
    }
    let (tag, body) = obj.iter().next()?;

    match tag.as_str() {
        "Local" => {
            let [frame_id, local_index] = body.as_array()?.as_slice() else {
                return None;
            };
            Some(RawLocation::Local(
                frame_id.as_u64()?,
                usize::try_from(local_index.as_u64()?).ok()?,
            ))
        }
        "Indexed" => {
            let [base, index] = body.as_array()?.as_slice() else {
                return None;
            };
            Some(RawLocation::Indexed(
                Box::new(RawLocation::from(base.clone())),
                usize::try_from(index.as_u64()?).ok()?,
            ))
        }
        "Global" => Some(RawLocation::Global(body.as_u64()?)),
        _ => None,
    }
}
