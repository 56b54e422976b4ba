//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod inspect;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use inspect::{execute_inspect, render_summary, validate_args};
pub use models::InspectArgs;
pub use utils::{display_schema, display_version, validate_report_file};
