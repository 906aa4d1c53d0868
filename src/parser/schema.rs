//! Output schema definitions for trace analysis results.
//!
//! This module defines the structures handed to reporting code and written
//! to JSON reports. The report schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};

/// One ranked row of a summary table
///
/// Serialized as a flat array in column order:
/// `[name, events, share, total, average, std_dev, variance]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RowCells", from = "RowCells")]
pub struct SummaryRow {
    /// Category or function name
    pub name: String,

    /// Number of samples
    pub events: usize,

    /// Total time relative to the largest total in the same table (0..=1)
    pub share: f64,

    /// Total time in seconds
    pub total_secs: f64,

    /// Mean time in seconds
    pub average_secs: f64,

    /// Population standard deviation in seconds
    pub std_dev_secs: f64,

    /// Population variance in seconds squared
    pub variance_secs2: f64,
}

type RowCells = (String, usize, f64, f64, f64, f64, f64);

impl From<SummaryRow> for RowCells {
    fn from(row: SummaryRow) -> Self {
        (
            row.name,
            row.events,
            row.share,
            row.total_secs,
            row.average_secs,
            row.std_dev_secs,
            row.variance_secs2,
        )
    }
}

impl From<RowCells> for SummaryRow {
    fn from(cells: RowCells) -> Self {
        let (name, events, share, total_secs, average_secs, std_dev_secs, variance_secs2) = cells;
        Self {
            name,
            events,
            share,
            total_secs,
            average_secs,
            std_dev_secs,
            variance_secs2,
        }
    }
}

/// A titled table of summary rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    /// Column labels, name column first
    pub headers: Vec<String>,

    /// Rows ranked by total time (descending)
    #[serde(rename = "data")]
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Analysis result of one trace file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceResult {
    /// Traced process id, taken from the file name
    pub pid: u64,

    /// Trace kind (`posix` or `server`)
    #[serde(rename = "name")]
    pub trace_kind: String,

    /// Seconds between the first and last timestamp of the file
    #[serde(rename = "total_exec_time")]
    pub total_exec_secs: f64,

    /// Per syscall / request statistics
    #[serde(rename = "global")]
    pub categories: SummaryTable,

    /// Per internal hook statistics
    #[serde(rename = "function")]
    pub functions: SummaryTable,
}

/// A trace file that could not be analysed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: String,
    pub error: String,
}

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Successfully analysed traces, in discovery order
    pub traces: Vec<TraceResult>,

    /// Files that failed, in discovery order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
}
