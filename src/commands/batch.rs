//! Batch command implementation.
//!
//! Finds every trace below a root directory and analyses each file on its
//! own. A file that fails is reported and skipped; it never aborts the batch.

use crate::commands::analyze::validate_top_rows;
use crate::commands::models::BatchArgs;
use crate::output::{build_report, render_trace, write_report};
use crate::parser::{analyze_file, FileFailure, TraceDialect, TraceResult};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Results of a batch run, both lists in discovery order
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub traces: Vec<(PathBuf, TraceResult)>,
    pub failures: Vec<FileFailure>,
}

impl BatchOutcome {
    /// Results without their source paths
    pub fn results(&self) -> Vec<TraceResult> {
        self.traces.iter().map(|(_, trace)| trace.clone()).collect()
    }
}

/// Recursively find trace files with the given extension
///
/// **Public** - discovery step of the batch command
///
/// Paths are returned sorted by file name within each directory so that
/// repeated runs see the same order. Unreadable directory entries are logged
/// and skipped.
pub fn discover_traces(root: &Path, extension: &str) -> Vec<PathBuf> {
    let extension = extension.trim_start_matches('.');

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect()
}

/// Analyse each path independently
///
/// **Public** - per-file failures are collected, not propagated
pub fn analyze_paths(paths: &[PathBuf], dialect: Option<TraceDialect>) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for path in paths {
        match analyze_file(path, dialect) {
            Ok(trace) => outcome.traces.push((path.clone(), trace)),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                outcome.failures.push(FileFailure {
                    path: path.display().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    outcome
}

/// Execute the batch command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Report write errors. Failures of individual traces are part of the
///   returned outcome instead.
pub fn execute_batch(args: BatchArgs) -> Result<BatchOutcome> {
    let start_time = Instant::now();

    info!("Searching {} for *.{} traces", args.root.display(), args.extension);
    let paths = discover_traces(&args.root, &args.extension);
    info!("Found {} trace files", paths.len());

    let outcome = analyze_paths(&paths, args.dialect);
    debug!(
        "{} traces analysed, {} failed",
        outcome.traces.len(),
        outcome.failures.len()
    );

    if let Some(output) = &args.output_json {
        let report = build_report(outcome.results(), outcome.failures.clone());
        write_report(&report, output).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", output.display());
    }

    if args.print_summary {
        for (path, trace) in &outcome.traces {
            println!("\n== {}", path.display());
            println!("{}", render_trace(trace, args.top_rows));
        }
        for failure in &outcome.failures {
            println!("\n!! {}: {}", failure.path, failure.error);
        }
    }

    info!(
        "Batch completed in {:.2}s ({} ok, {} failed)",
        start_time.elapsed().as_secs_f64(),
        outcome.traces.len(),
        outcome.failures.len()
    );

    Ok(outcome)
}

/// Validate batch arguments
///
/// **Public** - can be called before execute_batch for early validation
pub fn validate_batch_args(args: &BatchArgs) -> Result<()> {
    if !args.root.is_dir() {
        anyhow::bail!("Trace root is not a directory: {}", args.root.display());
    }

    let extension = args.extension.trim_start_matches('.');
    if extension.is_empty() {
        anyhow::bail!("Trace extension cannot be empty");
    }

    validate_top_rows(args.top_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_discover_traces_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("b/server_2.log"), "");
        write(&dir.path().join("a/posix_1.log"), "");
        write(&dir.path().join("a/notes.txt"), "");
        write(&dir.path().join("posix_0.log"), "");

        let found = discover_traces(dir.path(), ".log");
        let names: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();

        assert_eq!(names.len(), 3);
        assert!(names[0].ends_with("posix_1.log"));
        assert!(names[1].ends_with("server_2.log"));
        assert_eq!(names[2], "posix_0.log");
    }

    #[test]
    fn test_failures_do_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("posix_10.log");
        let empty = dir.path().join("posix_11.log");
        let bad_name = dir.path().join("posix_x.log");
        let missing = dir.path().join("posix_12.log");
        write(&good, "+ at[1][x] read\nat[1][read] call()\nat[5][read] returned\n");
        write(&empty, "nothing to see\n");
        write(&bad_name, "at[1]\n");

        let outcome = analyze_paths(&[empty, good, bad_name, missing], None);

        assert_eq!(outcome.traces.len(), 1);
        assert_eq!(outcome.traces[0].1.pid, 10);
        assert_eq!(outcome.failures.len(), 3);
        assert!(outcome.failures[0].error.contains("No valid timestamps"));
    }

    #[test]
    fn test_validate_batch_args() {
        let dir = tempfile::tempdir().unwrap();
        let args = BatchArgs {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(validate_batch_args(&args).is_ok());

        let no_ext = BatchArgs {
            extension: ".".to_string(),
            ..args.clone()
        };
        assert!(validate_batch_args(&no_ext).is_err());

        let not_dir = BatchArgs {
            root: dir.path().join("missing"),
            ..args
        };
        assert!(validate_batch_args(&not_dir).is_err());
    }
}
