use std::path::PathBuf;

/// Arguments for the inspect command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct InspectArgs {
    /// Trace file to ingest
    pub trace_path: PathBuf,

    /// Output path for the JSON report (None = no file written)
    pub output_json: Option<PathBuf>,

    /// Attach the full canonical event stream to the report
    pub include_events: bool,

    /// Keep resolved Read effects in the canonical stream
    pub emit_reads: bool,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for InspectArgs {
    fn default() -> Self {
        Self {
            trace_path: PathBuf::from("trace.json"),
            output_json: None,
            include_events: false,
            emit_reads: false,
            print_summary: true,
        }
    }
}
