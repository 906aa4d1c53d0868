//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Extracting timestamps and hook names from trace lines
//! - Splitting traces into event blocks per dialect
//! - Streaming a trace file through the aggregator
//! - Defining the output schema

pub mod capio_trace;
pub mod dialect;
pub mod extract;
pub mod schema;
pub mod segmenter;

// Re-export main types
pub use capio_trace::{analyze_file, parse_process_id, parse_trace, to_trace_result, ParsedTrace};
pub use dialect::TraceDialect;
pub use extract::{extract_hook_name, extract_timestamp, TraceLine};
pub use schema::{FileFailure, ProfileReport, SummaryRow, SummaryTable, TraceResult};
pub use segmenter::{split_blocks, BlockSegmenter, EventBlock};
