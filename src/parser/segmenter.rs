//! Segmentation of a trace into event blocks.
//!
//! An event block is one syscall invocation or one server request, end to
//! end. The segmenter is fed one line at a time and hands back every block
//! as soon as it is complete, so a file never has to be held in memory.
//!
//! Syscall traces look like:
//!
//! ```text
//! + at[10][x] open
//! at[10][open] call(/tmp/f)
//! at[12][open] returned
//! ~ at[12][x]
//!
//! + at[20][x] read
//! ...
//! ```
//!
//! Server traces wrap each request in explicit markers:
//!
//! ```text
//! at[100][srv]: +++ REQUEST +++
//! at[101][open_handler] call(..)
//! at[140][open_handler] returned
//! at[141][srv]: ~~~ END REQUEST ~~~
//! ```

use super::dialect::TraceDialect;
use super::extract::{is_request_end, is_request_start, TraceLine};
use crate::utils::config::{DEFAULT_REQUEST_CATEGORY, HANDLER_SUFFIX, UNKNOWN_CATEGORY};
use log::trace;

/// An ordered run of trace lines forming one event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBlock {
    lines: Vec<TraceLine>,
}

impl EventBlock {
    pub fn new(lines: Vec<TraceLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[TraceLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Resolve the event category of this block
    ///
    /// Returns `None` for noise: blocks shorter than two lines or whose first
    /// line is not a start line of `dialect`.
    pub fn category(&self, dialect: TraceDialect) -> Option<String> {
        if self.lines.len() < 2 {
            return None;
        }

        match dialect {
            TraceDialect::Syscall => self.syscall_name(),
            TraceDialect::Request => self.request_name(),
        }
    }

    /// Syscall name is the third token of the `+` header line. An `unknown`
    /// header is resolved through the hook that follows it.
    fn syscall_name(&self) -> Option<String> {
        let header = self.lines[0].text();
        if !header.starts_with('+') {
            return None;
        }

        let name = header.split_whitespace().nth(2).unwrap_or(UNKNOWN_CATEGORY);
        if name.eq_ignore_ascii_case(UNKNOWN_CATEGORY) {
            if let Some(hook) = self.lines[1].hook() {
                return Some(hook.to_string());
            }
        }

        Some(name.to_string())
    }

    /// Request name is the first handler hook called inside the block
    fn request_name(&self) -> Option<String> {
        if !is_request_start(self.lines[0].text()) {
            return None;
        }

        let handler = self.lines.iter().find_map(|line| {
            line.hook()
                .filter(|hook| line.is_call() && hook.ends_with(HANDLER_SUFFIX))
        });

        Some(handler.unwrap_or(DEFAULT_REQUEST_CATEGORY).to_string())
    }
}

/// Incremental splitter of a line stream into event blocks
#[derive(Debug)]
pub struct BlockSegmenter {
    dialect: TraceDialect,
    current: Vec<TraceLine>,
}

impl BlockSegmenter {
    pub fn new(dialect: TraceDialect) -> Self {
        Self {
            dialect,
            current: Vec::new(),
        }
    }

    /// Feed the next line, returning the block it completes, if any
    pub fn push(&mut self, line: TraceLine) -> Option<EventBlock> {
        match self.dialect {
            TraceDialect::Syscall => self.push_syscall(line),
            TraceDialect::Request => self.push_request(line),
        }
    }

    /// Flush whatever is buffered once the input is exhausted
    pub fn finish(mut self) -> Option<EventBlock> {
        self.take_block()
    }

    fn push_syscall(&mut self, line: TraceLine) -> Option<EventBlock> {
        if line.is_blank() {
            return self.take_block();
        }
        self.current.push(line);
        None
    }

    fn push_request(&mut self, line: TraceLine) -> Option<EventBlock> {
        if is_request_start(line.text()) {
            // A request that never saw its end marker is closed by the next one
            let unterminated = self.take_block();
            if unterminated.is_some() {
                trace!("Request block closed without end marker");
            }
            self.current.push(line);
            return unterminated;
        }

        if self.current.is_empty() {
            trace!("Skipping line outside of request: {}", line.text());
            return None;
        }

        if line.is_blank() {
            return None;
        }

        let is_end = is_request_end(line.text());
        self.current.push(line);
        if is_end {
            self.take_block()
        } else {
            None
        }
    }

    fn take_block(&mut self) -> Option<EventBlock> {
        if self.current.is_empty() {
            None
        } else {
            Some(EventBlock::new(std::mem::take(&mut self.current)))
        }
    }
}

/// Split a whole in-memory trace into blocks
///
/// **Public** - convenience wrapper around [`BlockSegmenter`]
pub fn split_blocks(dialect: TraceDialect, text: &str) -> Vec<EventBlock> {
    let mut segmenter = BlockSegmenter::new(dialect);
    let mut blocks: Vec<EventBlock> = text
        .lines()
        .filter_map(|raw| segmenter.push(TraceLine::parse(raw)))
        .collect();
    blocks.extend(segmenter.finish());
    blocks
}
