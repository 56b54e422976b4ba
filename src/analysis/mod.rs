//! Reconstruction of runtime state from raw trace events.
//!
//! This module turns the flat raw event log into:
//! - A canonical, strongly-typed event stream
//! - Per-frame local variable lifetime tables
//! - Ingest statistics, including recoverable warnings

pub mod lifetime;
pub mod normalizer;

// Re-export main types and functions
pub use lifetime::{LifetimeAnalyzer, LifetimeRow};
pub use normalizer::{normalize, EventNormalizer, IngestStats, NormalizeOptions, NormalizedTrace};
