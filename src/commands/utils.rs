use crate::output::read_report;
use crate::utils::config::{REPORT_SCHEMA_VERSION, SUPPORTED_TRACE_VERSIONS};
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)
        .with_context(|| format!("Not a valid report: {}", file_path.display()))?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  Frames: {}", report.frames.len());
    println!("  Unresolved effects: {}", report.stats.unresolved_effects);
    println!("  Warnings: {}", report.warnings.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("VM Trace Studio Report Schema");
    println!("Current Version: {}", REPORT_SCHEMA_VERSION);
    println!("Accepted trace versions: {:?}", SUPPORTED_TRACE_VERSIONS);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  source: string           - Trace file path");
        println!("  event_counts: object     - Canonical events per kind");
        println!("  frames: array            - Frames in open order");
        println!("    id: number             - Frame id");
        println!("    function: string       - address::module::function");
        println!("    locals: array          - index, type_name, lifetime_end");
        println!("  stats: object            - Ingest counters");
        println!("  warnings: array          - Recoverable conditions");
        println!("  events: array?           - Canonical stream (with --events)");
        println!("  generated_at: string     - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("VM Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Execution-trace ingestion and local-lifetime reconstruction for VM debuggers.");
}
