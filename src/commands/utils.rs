use crate::output::read_report;
use crate::utils::config::{FUNCTION_COLUMN, SCHEMA_VERSION, STAT_COLUMNS};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)
        .with_context(|| format!("Invalid report {}", file_path.display()))?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Traces: {}", report.traces.len());
    for trace in &report.traces {
        println!(
            "    pid {:<8} {:<7} {:>10.3}s  {} categories, {} functions",
            trace.pid,
            trace.trace_kind,
            trace.total_exec_secs,
            trace.categories.rows.len(),
            trace.functions.rows.len()
        );
    }
    if !report.failures.is_empty() {
        println!("  Failures: {}", report.failures.len());
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("CAPIO Profiler Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string           - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string      - RFC 3339 timestamp");
        println!("  traces: array             - One entry per analysed trace");
        println!("    pid: number             - Process id from the file name");
        println!("    name: string            - Trace kind ('posix' or 'server')");
        println!("    total_exec_time: number - Seconds between first and last timestamp");
        println!("    global: table           - Per-category statistics (SYSCALL / REQUEST)");
        println!("    function: table         - Per-function statistics ({})", FUNCTION_COLUMN);
        println!("  failures: array?          - Files that could not be analysed");
        println!("    path: string");
        println!("    error: string");
        println!();
        println!("Tables are {{ headers: [...], data: [[...], ...] }} with columns:");
        println!("  <name>, {}", STAT_COLUMNS.join(", "));
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("CAPIO Profiler v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Timing statistics for CAPIO POSIX and server trace logs.");
}
