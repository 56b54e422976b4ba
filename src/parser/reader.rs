//! Trace file reader.
//!
//! Loads a trace document, checks its envelope and version, then feeds every
//! event through the normalizer. There is no best-effort mode: the first
//! format or schema problem aborts the read.

use super::schema::{RawEvent, RawTraceFile};
use crate::analysis::{EventNormalizer, NormalizeOptions, NormalizedTrace};
use crate::utils::config::SUPPORTED_TRACE_VERSIONS;
use crate::utils::error::TraceError;
use log::{debug, info};
use serde_json::Value;
use std::path::Path;

/// Read and normalize a trace file with default options
///
/// **Public** - main entry point for trace ingestion
///
/// # Errors
/// * `TraceError::Io` - File could not be read
/// * `TraceError::Json` / `InvalidFormat` / `UnsupportedVersion` - Not a usable trace document
/// * `TraceError::MalformedEvent` / `StackMismatch` / `DuplicateFrame` - Bad event stream
pub fn read_trace(path: impl AsRef<Path>) -> Result<NormalizedTrace, TraceError> {
    read_trace_with(path, &NormalizeOptions::default())
}

/// Read and normalize a trace file
pub fn read_trace_with(
    path: impl AsRef<Path>,
    options: &NormalizeOptions,
) -> Result<NormalizedTrace, TraceError> {
    let path = path.as_ref();
    info!("Reading trace from: {}", path.display());

    let text = std::fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_trace_str(&text, options)
}

/// Parse and normalize an in-memory trace document
pub fn parse_trace_str(text: &str, options: &NormalizeOptions) -> Result<NormalizedTrace, TraceError> {
    let file: RawTraceFile = serde_json::from_str(text).map_err(TraceError::from_json)?;

    let version = validate_trace_version(file.version)?;
    let events = file
        .events
        .ok_or_else(|| TraceError::InvalidFormat("missing `events` array".to_string()))?;

    debug!("Trace version {}, {} raw events", version, events.len());

    normalize_json_events(events, options)
}

/// Check the envelope version
///
/// **Public** - also used by callers that only want to sniff a file
pub fn validate_trace_version(version: Option<u64>) -> Result<u64, TraceError> {
    let version =
        version.ok_or_else(|| TraceError::InvalidFormat("missing `version` field".to_string()))?;

    if SUPPORTED_TRACE_VERSIONS.contains(&version) {
        Ok(version)
    } else {
        Err(TraceError::UnsupportedVersion {
            found: version,
            supported: SUPPORTED_TRACE_VERSIONS,
        })
    }
}

/// **Private** - decode each event into the raw schema and normalize it
fn normalize_json_events(
    events: Vec<Value>,
    options: &NormalizeOptions,
) -> Result<NormalizedTrace, TraceError> {
    let mut normalizer = EventNormalizer::new(options.clone());

    for (index, value) in events.into_iter().enumerate() {
        let raw = serde_json::from_value::<RawEvent>(value)
            .map_err(|source| TraceError::MalformedEvent { index, source })?;
        normalizer.push(index, raw)?;
    }

    Ok(normalizer.finish())
}
