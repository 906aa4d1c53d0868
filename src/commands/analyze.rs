//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Picks the trace dialect (forced or from the file name)
//! 2. Streams the trace through the parser and aggregator
//! 3. Writes the JSON report (if requested)
//! 4. Prints a text summary (if requested)

use crate::commands::models::AnalyzeArgs;
use crate::output::{build_report, render_trace, write_report};
use crate::parser::{analyze_file, TraceResult};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The analysis result of the trace, after any requested output was written
///
/// # Errors
/// * Trace file missing or unreadable
/// * Trace without any timestamp ("no data")
/// * Report write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<TraceResult> {
    let start_time = Instant::now();

    info!("Starting analysis of: {}", args.trace_file.display());

    let result = analyze_file(&args.trace_file, args.dialect).with_context(|| {
        format!("Failed to analyze trace {}", args.trace_file.display())
    })?;

    debug!(
        "{} categories, {} internal functions",
        result.categories.rows.len(),
        result.functions.rows.len()
    );

    if let Some(output) = &args.output_json {
        let report = build_report(vec![result.clone()], Vec::new());
        write_report(&report, output).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", output.display());
    }

    if args.print_summary {
        println!("\n{}", render_trace(&result, args.top_rows));
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(result)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.trace_file.as_os_str().is_empty() {
        anyhow::bail!("Trace file path cannot be empty");
    }

    if !args.trace_file.is_file() {
        anyhow::bail!("Trace file not found: {}", args.trace_file.display());
    }

    validate_top_rows(args.top_rows)
}

/// Shared check of the summary row limit
pub(crate) fn validate_top_rows(top_rows: usize) -> Result<()> {
    if top_rows == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if top_rows > 1000 {
        anyhow::bail!("top is too large (max 1000)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn trace_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_validate_args_valid() {
        let dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            trace_file: trace_file(&dir, "posix_1.log", "at[1]\n"),
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_path() {
        assert!(validate_args(&AnalyzeArgs::default()).is_err());
    }

    #[test]
    fn test_validate_args_missing_file() {
        let args = AnalyzeArgs {
            trace_file: PathBuf::from("/definitely/not/here/posix_1.log"),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = trace_file(&dir, "posix_1.log", "at[1]\n");

        let zero = AnalyzeArgs {
            trace_file: path.clone(),
            top_rows: 0,
            ..Default::default()
        };
        assert!(validate_args(&zero).is_err());

        let huge = AnalyzeArgs {
            trace_file: path,
            top_rows: 2000,
            ..Default::default()
        };
        assert!(validate_args(&huge).is_err());
    }

    #[test]
    fn test_execute_analyze_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = trace_file(
            &dir,
            "posix_321.log",
            "+ at[100][x] write\nat[100][write] call(1)\nat[150][write] returned\n\n",
        );
        let output = dir.path().join("out/report.json");

        let result = execute_analyze(AnalyzeArgs {
            trace_file: path,
            output_json: Some(output.clone()),
            print_summary: false,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(result.pid, 321);
        assert_eq!(result.categories.rows[0].name, "write");
        assert!(output.exists());
    }
}
