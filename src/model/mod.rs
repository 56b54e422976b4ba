//! Canonical, strongly-typed trace model.
//!
//! Everything in here is produced by the normalizer and is immutable
//! once ingestion completes. Debug adapters consume these types directly.

pub mod event;
pub mod lifetime;
pub mod value;

/// Identifier of one call-stack activation, unique among open frames
pub type FrameId = u64;

/// Instruction offset within a function body
pub type Pc = u64;

pub use event::{ModuleInfo, TraceEffect, TraceEvent, TraceLocation};
pub use lifetime::LifetimeEnd;
pub use value::{CompoundValue, RuntimeValue};
