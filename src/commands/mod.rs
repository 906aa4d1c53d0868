//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod batch;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, validate_args};
pub use batch::{analyze_paths, discover_traces, execute_batch, validate_batch_args, BatchOutcome};
pub use models::{AnalyzeArgs, BatchArgs};
pub use utils::{display_schema, display_version, validate_report_file};
