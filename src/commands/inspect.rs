//! Inspect command implementation.
//!
//! The inspect command:
//! 1. Reads and normalizes the trace
//! 2. Builds a report
//! 3. Writes the report and/or prints a text summary

use super::models::InspectArgs;
use crate::analysis::NormalizeOptions;
use crate::model::LifetimeEnd;
use crate::output::{to_report, validate_path, write_report, TraceReport};
use crate::parser::read_trace_with;
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the inspect command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace loading errors (format, schema, I/O)
/// * File write errors
pub fn execute_inspect(args: InspectArgs) -> Result<TraceReport> {
    let start_time = Instant::now();

    info!("Step 1/3: Reading trace {}...", args.trace_path.display());
    let options = NormalizeOptions::default().with_reads(args.emit_reads);
    let trace = read_trace_with(&args.trace_path, &options)
        .with_context(|| format!("Failed to load trace {}", args.trace_path.display()))?;

    debug!(
        "Normalized trace: {} events, {} frames",
        trace.events.len(),
        trace.local_lifetime_ends.len()
    );

    info!("Step 2/3: Building report...");
    let source = args.trace_path.display().to_string();
    let report = to_report(&source, &trace, args.include_events);

    info!("Step 3/3: Writing outputs...");
    if let Some(output) = &args.output_json {
        write_report(&report, output).context("Failed to write report")?;
    }
    if args.print_summary {
        println!("{}", render_summary(&report));
    }

    info!("Inspect finished in {:.2?}", start_time.elapsed());
    Ok(report)
}

/// Validate inspect arguments before doing any work
///
/// **Public** - called from main.rs before execution
pub fn validate_args(args: &InspectArgs) -> Result<()> {
    if !args.trace_path.is_file() {
        bail!("Trace file not found: {}", args.trace_path.display());
    }
    if let Some(output) = &args.output_json {
        validate_path(output).context("Invalid report path")?;
    }
    if args.output_json.is_none() && !args.print_summary {
        bail!("Nothing to do: pass --output and/or --summary");
    }
    Ok(())
}

/// Plain-text report summary
///
/// **Public** - printed by `inspect --summary`
pub fn render_summary(report: &TraceReport) -> String {
    let mut lines = vec![
        format!("Trace: {}", report.source),
        format!(
            "Events: {} ({})",
            report.event_counts.values().sum::<usize>(),
            report
                .event_counts
                .iter()
                .map(|(kind, count)| format!("{} {}", count, kind))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        format!("Frames: {}", report.frames.len()),
    ];

    for frame in &report.frames {
        lines.push(format!("  [{}] {}", frame.id, frame.function));
        for local in &frame.locals {
            let lifetime = match local.lifetime_end {
                Some(LifetimeEnd::Frame) => "until frame close".to_string(),
                Some(LifetimeEnd::Pc(pc)) => format!("ends at pc {}", pc),
                None => "never live".to_string(),
            };
            lines.push(format!(
                "      local {}: {} ({})",
                local.index,
                local.type_name.as_deref().unwrap_or("?"),
                lifetime
            ));
        }
    }

    for warning in &report.warnings {
        lines.push(format!("warning: {}", warning));
    }

    lines.join("\n")
}
