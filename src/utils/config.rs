//! Configuration and constants for the profiler.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Extension of trace files picked up by batch discovery
pub const DEFAULT_TRACE_EXTENSION: &str = "log";

/// File name fragment that marks a syscall (POSIX) trace
pub const POSIX_NAME_MARKER: &str = "posix";

// Trace timestamps are milliseconds, reports are in seconds
pub const MS_PER_SECOND: f64 = 1000.0;

/// Category used when a syscall header carries no usable name
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Category used for a request block with no recognised handler
pub const DEFAULT_REQUEST_CATEGORY: &str = "REQUEST";

/// Hook names ending with this suffix name the request they serve
pub const HANDLER_SUFFIX: &str = "_handler";

// Markers for nested hook lines
pub const CALL_MARKER: &str = "call(";
pub const RETURN_MARKER: &str = "returned";

/// First column label of the internal function table
pub const FUNCTION_COLUMN: &str = "__FUNCTION__";

/// Column labels shared by both tables, after the name column
pub const STAT_COLUMNS: &[&str] = &[
    "Events",
    "Share",
    "Total seconds",
    "Average",
    "Std.dev",
    "Variance",
];

/// Default number of rows printed per table in summaries
pub const DEFAULT_SUMMARY_ROWS: usize = 20;
