//! Canonical trace events.

use super::{FrameId, Pc, RuntimeValue};
use serde::{Deserialize, Serialize};

/// One normalized step of the recorded execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEvent {
    OpenFrame {
        id: FrameId,
        name: String,
        module: ModuleInfo,
        is_native: bool,
        /// Rendered type of every local slot, parameters first
        local_types: Vec<String>,
        type_instantiation: Vec<String>,
        param_values: Vec<RuntimeValue>,
    },

    CloseFrame {
        id: FrameId,
        return_values: Vec<RuntimeValue>,
    },

    Instruction {
        pc: Pc,
        /// Opcode mnemonic as recorded by the VM
        instruction: String,
        gas_left: u64,
    },

    Effect(TraceEffect),
}

/// Module that owns a frame's function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub address: String,
    pub name: String,
}

/// Memory effect kept in the canonical stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEffect {
    Write {
        location: TraceLocation,
        value: RuntimeValue,
    },

    /// Only emitted when read visibility is requested
    Read {
        location: TraceLocation,
        value: RuntimeValue,
    },

    /// Abort raised by the VM while executing the preceding instruction
    ExecutionError(String),
}

/// Storage slot an effect refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TraceLocation {
    Local { frame_id: FrameId, local_index: usize },
}

impl TraceEvent {
    /// Short tag used in logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            TraceEvent::OpenFrame { .. } => "OpenFrame",
            TraceEvent::CloseFrame { .. } => "CloseFrame",
            TraceEvent::Instruction { .. } => "Instruction",
            TraceEvent::Effect(TraceEffect::Write { .. }) => "Write",
            TraceEvent::Effect(TraceEffect::Read { .. }) => "Read",
            TraceEvent::Effect(TraceEffect::ExecutionError(_)) => "ExecutionError",
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, TraceEvent::Effect(TraceEffect::Write { .. }))
    }
}
