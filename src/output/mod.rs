//! Output writers for trace reports.
//!
//! This module handles:
//! - Building report summaries from normalized traces
//! - Writing and reading JSON reports

pub mod json;
pub mod report;

// Re-export main functions
pub use json::{read_report, validate_path, write_report};
pub use report::{to_report, FrameSummary, LocalSummary, TraceReport};
