//! VM Trace Studio
//!
//! Ingests execution traces recorded by a stack-based bytecode VM and
//! reconstructs the runtime model a step-through debugger needs:
//!
//! - a canonical, strongly-typed event stream ([`model::TraceEvent`])
//! - per-frame local variable lifetime tables
//!
//! ## Getting Started
//!
//! ```ignore
//! let trace = vm_trace_studio::parser::read_trace("trace.json")?;
//! for event in &trace.events {
//!     println!("{}", event.kind());
//! }
//! let live = trace.is_local_live(1, 0, 12);
//! ```
//!
//! The `vm-trace` binary wraps this library for quick inspection of trace files.

pub mod analysis;
pub mod commands;
pub mod model;
pub mod output;
pub mod parser;
pub mod utils;

pub use analysis::{NormalizeOptions, NormalizedTrace};
pub use parser::{read_trace, read_trace_with};
pub use utils::error::TraceError;
