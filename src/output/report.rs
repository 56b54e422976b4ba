//! Report schema written by the inspect command.
//!
//! A report is a compact, versioned summary of one normalized trace: frames,
//! their locals with lifetimes, ingest statistics and warnings. The full
//! canonical event stream is attached on request.

use crate::analysis::{IngestStats, NormalizedTrace};
use crate::model::{FrameId, LifetimeEnd, TraceEvent};
use crate::utils::config::REPORT_SCHEMA_VERSION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file the report was built from
    pub source: String,

    /// Canonical event count per kind
    pub event_counts: BTreeMap<String, usize>,

    /// Frames in the order they were opened
    pub frames: Vec<FrameSummary>,

    pub stats: IngestStats,

    pub warnings: Vec<String>,

    /// Full canonical stream, only when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<TraceEvent>>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// One activation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSummary {
    pub id: FrameId,

    /// `address::module::function`
    pub function: String,

    pub is_native: bool,

    pub locals: Vec<LocalSummary>,
}

/// One local slot of a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalSummary {
    pub index: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// `None` when the slot was never observed live
    pub lifetime_end: Option<LifetimeEnd>,
}

/// Summarize a normalized trace
///
/// **Public** - used by the inspect command to create final output
pub fn to_report(source: &str, trace: &NormalizedTrace, include_events: bool) -> TraceReport {
    use chrono::Utc;

    let mut event_counts = BTreeMap::new();
    for event in &trace.events {
        *event_counts.entry(event.kind().to_string()).or_insert(0) += 1;
    }

    let frames = trace
        .events
        .iter()
        .filter_map(|event| match event {
            TraceEvent::OpenFrame {
                id,
                name,
                module,
                is_native,
                local_types,
                ..
            } => Some(summarize_frame(
                *id,
                format!("{}::{}::{}", module.address, module.name, name),
                *is_native,
                local_types,
                trace,
            )),
            _ => None,
        })
        .collect();

    TraceReport {
        version: REPORT_SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        event_counts,
        frames,
        stats: trace.stats.clone(),
        warnings: trace.stats.warnings(),
        events: include_events.then(|| trace.events.clone()),
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// **Private** - pair declared local types with their lifetime ends
fn summarize_frame(
    id: FrameId,
    function: String,
    is_native: bool,
    local_types: &[String],
    trace: &NormalizedTrace,
) -> FrameSummary {
    let tracked = trace.local_lifetime_ends.get(&id).map_or(0, Vec::len);
    let slot_count = local_types.len().max(tracked);

    let locals = (0..slot_count)
        .map(|index| LocalSummary {
            index,
            type_name: local_types.get(index).cloned(),
            lifetime_end: trace.lifetime_end(id, index),
        })
        .collect();

    FrameSummary {
        id,
        function,
        is_native,
        locals,
    }
}
