//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::model::FrameId;
use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a [`TraceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The trace file could not be read at all
    Io,
    /// The document is not a trace: bad JSON, missing envelope fields, unknown version
    Format,
    /// An individual event is malformed or breaks call-stack discipline
    Schema,
}

/// Errors that can occur while loading and normalizing a trace.
///
/// Every variant is fatal for the call that produced it; recoverable
/// conditions are reported through `IngestStats` instead.
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to read trace file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed trace JSON at line {line}, column {column}: {source}")]
    Json {
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported trace version {found} (supported: {supported:?})")]
    UnsupportedVersion { found: u64, supported: &'static [u64] },

    #[error("Event {index} does not match any known event shape: {source}")]
    MalformedEvent {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Event {index}: CloseFrame({found}) does not match the open frame {expected:?}")]
    StackMismatch {
        index: usize,
        expected: Option<FrameId>,
        found: FrameId,
    },

    #[error("Event {index}: frame {frame_id} opened while a frame with the same id is still open")]
    DuplicateFrame { index: usize, frame_id: FrameId },
}

impl TraceError {
    /// Wrap a top-level JSON failure, keeping the position serde_json reports
    pub fn from_json(source: serde_json::Error) -> Self {
        TraceError::Json {
            line: source.line(),
            column: source.column(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TraceError::Io { .. } => ErrorCategory::Io,
            TraceError::Json { .. }
            | TraceError::InvalidFormat(_)
            | TraceError::UnsupportedVersion { .. } => ErrorCategory::Format,
            TraceError::MalformedEvent { .. }
            | TraceError::StackMismatch { .. }
            | TraceError::DuplicateFrame { .. } => ErrorCategory::Schema,
        }
    }

    /// Index of the offending event, when the failure is tied to one
    pub fn event_index(&self) -> Option<usize> {
        match self {
            TraceError::MalformedEvent { index, .. }
            | TraceError::StackMismatch { index, .. }
            | TraceError::DuplicateFrame { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
