use crate::parser::TraceDialect;
use crate::utils::config::{DEFAULT_SUMMARY_ROWS, DEFAULT_TRACE_EXTENSION};
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Trace file to analyse
    pub trace_file: PathBuf,

    /// Forced dialect (None = guess from file name)
    pub dialect: Option<TraceDialect>,

    /// Output path for JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Number of rows per table in the summary
    pub top_rows: usize,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            trace_file: PathBuf::new(),
            dialect: None,
            output_json: None,
            print_summary: true,
            top_rows: DEFAULT_SUMMARY_ROWS,
        }
    }
}

/// Arguments for the batch command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct BatchArgs {
    /// Directory searched recursively for traces
    pub root: PathBuf,

    /// Extension of trace files, without the dot
    pub extension: String,

    /// Forced dialect for every file (None = guess per file name)
    pub dialect: Option<TraceDialect>,

    /// Output path for JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Number of rows per table in the summary
    pub top_rows: usize,
}

impl Default for BatchArgs {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extension: DEFAULT_TRACE_EXTENSION.to_string(),
            dialect: None,
            output_json: None,
            print_summary: false,
            top_rows: DEFAULT_SUMMARY_ROWS,
        }
    }
}
