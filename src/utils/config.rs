//! Configuration and constants for trace ingestion and reporting.

use crate::model::LifetimeEnd;

/// Trace format versions this reader understands
pub const SUPPORTED_TRACE_VERSIONS: &[u64] = &[1];

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Alive-sentinel: the local stays live until its frame closes
pub const FRAME_LIFETIME: LifetimeEnd = LifetimeEnd::Frame;
