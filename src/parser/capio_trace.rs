//! Main trace parser for CAPIO trace files.
//!
//! Streams a trace line by line through the block segmenter and the
//! aggregation context, then assembles the ranked tables into a
//! [`TraceResult`].

use super::dialect::TraceDialect;
use super::extract::TraceLine;
use super::schema::{SummaryTable, TraceResult};
use super::segmenter::{BlockSegmenter, EventBlock};
use crate::aggregator::reduce_table;
use crate::aggregator::stats::AggregationContext;
use crate::utils::config::{FUNCTION_COLUMN, MS_PER_SECOND, STAT_COLUMNS};
use crate::utils::error::AnalysisError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// First and last timestamp seen anywhere in a trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeSpan {
    first_ms: Option<u64>,
    last_ms: Option<u64>,
}

impl TimeSpan {
    pub fn observe(&mut self, ts: u64) {
        if self.first_ms.is_none() {
            self.first_ms = Some(ts);
        }
        self.last_ms = Some(ts);
    }

    /// Seconds from first to last timestamp, `None` if nothing was observed
    ///
    /// Timestamps are taken in file order, so a trace whose last stamp is
    /// smaller than its first yields a negative span.
    pub fn total_seconds(&self) -> Option<f64> {
        let (first, last) = (self.first_ms?, self.last_ms?);
        Some((last as f64 - first as f64) / MS_PER_SECOND)
    }
}

/// Parsed trace data (internal representation)
#[derive(Debug, Clone)]
pub struct ParsedTrace {
    pub dialect: TraceDialect,
    pub span: TimeSpan,
    pub context: AggregationContext,
    pub lines: usize,
    pub blocks: usize,
    pub ignored_blocks: usize,
}

/// Parse a trace from any buffered reader
///
/// **Public** - main entry point for parsing
///
/// Invalid UTF-8 is replaced rather than rejected. Only I/O failures are
/// errors; malformed lines and blocks are dropped.
pub fn parse_trace<R: BufRead>(reader: R, dialect: TraceDialect) -> Result<ParsedTrace, AnalysisError> {
    let mut segmenter = BlockSegmenter::new(dialect);
    let mut parsed = ParsedTrace {
        dialect,
        span: TimeSpan::default(),
        context: AggregationContext::new(),
        lines: 0,
        blocks: 0,
        ignored_blocks: 0,
    };

    for raw in reader.split(b'\n') {
        let raw = raw?;
        let line = TraceLine::parse(&String::from_utf8_lossy(&raw));
        parsed.lines += 1;

        if let Some(ts) = line.timestamp() {
            parsed.span.observe(ts);
        }
        if let Some(block) = segmenter.push(line) {
            parsed.account(&block);
        }
    }

    if let Some(block) = segmenter.finish() {
        parsed.account(&block);
    }

    debug!(
        "Parsed {} lines into {} blocks ({} ignored)",
        parsed.lines, parsed.blocks, parsed.ignored_blocks
    );

    Ok(parsed)
}

impl ParsedTrace {
    fn account(&mut self, block: &EventBlock) {
        if self.context.process_block(block, self.dialect) {
            self.blocks += 1;
        } else {
            self.ignored_blocks += 1;
        }
    }
}

/// Convert parsed trace to the output result format
///
/// **Public** - used by commands to create final output
///
/// # Errors
/// * `AnalysisError::NoData` - the trace contained no timestamp at all
pub fn to_trace_result(
    parsed: &ParsedTrace,
    pid: u64,
    source: &str,
) -> Result<TraceResult, AnalysisError> {
    let total_exec_secs = parsed
        .span
        .total_seconds()
        .ok_or_else(|| AnalysisError::NoData(source.to_string()))?;

    Ok(TraceResult {
        pid,
        trace_kind: parsed.dialect.kind_label().to_string(),
        total_exec_secs,
        categories: SummaryTable {
            headers: table_headers(parsed.dialect.category_label()),
            rows: reduce_table(parsed.context.categories()),
        },
        functions: SummaryTable {
            headers: table_headers(FUNCTION_COLUMN),
            rows: reduce_table(parsed.context.functions()),
        },
    })
}

/// Column labels of a table whose first column is `name_column`
pub fn table_headers(name_column: &str) -> Vec<String> {
    std::iter::once(name_column)
        .chain(STAT_COLUMNS.iter().copied())
        .map(str::to_string)
        .collect()
}

/// Extract the traced process id from a file name
///
/// The id is the text after the last `_` and before the extension, e.g.
/// `posix_1234.log` -> 1234.
pub fn parse_process_id(path: &Path) -> Result<u64, AnalysisError> {
    let invalid = || AnalysisError::InvalidFileName(path.display().to_string());

    let name = path.file_name().ok_or_else(invalid)?.to_string_lossy();
    let suffix = name.rsplit('_').next().unwrap_or_default();
    let stem = suffix.split('.').next().unwrap_or(suffix);

    stem.parse().map_err(|_| invalid())
}

/// Analyse one trace file
///
/// **Public** - per-file entry point used by the commands
///
/// # Arguments
/// * `path` - Trace file to read
/// * `dialect` - Forced dialect, or `None` to guess it from the file name
///
/// # Errors
/// * `AnalysisError::InvalidFileName` - no process id in the file name
/// * `AnalysisError::Io` - the file could not be opened or read
/// * `AnalysisError::NoData` - the file contains no timestamps
pub fn analyze_file(
    path: &Path,
    dialect: Option<TraceDialect>,
) -> Result<TraceResult, AnalysisError> {
    let pid = parse_process_id(path)?;
    let dialect = dialect.unwrap_or_else(|| TraceDialect::from_path(path));

    info!("Analyzing {} as {} trace", path.display(), dialect);

    let parsed = {
        let file = File::open(path)?;
        parse_trace(BufReader::new(file), dialect)?
    };

    to_trace_result(&parsed, pid, &path.display().to_string())
}
