//! Trace reading and raw schema definitions.
//!
//! This module handles:
//! - Deserializing the raw trace document
//! - Validating the trace format version
//! - Decoding raw values and type descriptors
//! - Resolving effect locations to local slots

pub mod location;
pub mod reader;
pub mod schema;
pub mod value;

// Re-export main types
pub use location::{resolve_location, ResolvedSlot};
pub use reader::{parse_trace_str, read_trace, read_trace_with, validate_trace_version};
pub use schema::{RawEffect, RawEvent, RawFrame, RawLocation, RawTraceFile, RawTraceValue};
pub use value::{decode_trace_value, decode_value, render_local_type, render_type};
