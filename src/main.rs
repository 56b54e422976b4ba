//! VM Trace Studio CLI
//!
//! Loads VM execution traces, normalizes them and reports frames,
//! local lifetimes and ingest warnings.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use vm_trace_studio::commands::{
    display_schema, display_version, execute_inspect, validate_args, validate_report_file,
    InspectArgs,
};

/// VM Trace Studio - trace ingestion for step-through debuggers
#[derive(Parser, Debug)]
#[command(name = "vm-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest a trace file and report frames and local lifetimes
    Inspect {
        /// Trace JSON file produced by the VM
        #[arg(short, long)]
        file: PathBuf,

        /// Output path for the JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include the full canonical event stream in the report
        #[arg(long)]
        events: bool,

        /// Keep Read effects in the canonical event stream
        #[arg(long)]
        emit_reads: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Inspect {
            file,
            output,
            events,
            emit_reads,
            summary,
        } => {
            let args = InspectArgs {
                trace_path: file,
                // without an output file the summary is the only result
                print_summary: summary || output.is_none(),
                output_json: output,
                include_events: events,
                emit_reads,
            };

            validate_args(&args)?;
            execute_inspect(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
