//! Reconciliation of nested hook calls inside one event block.
//!
//! Hooks log a `call(` line on entry and a `returned` line on exit. Within a
//! block these pairs nest, so they are matched with a LIFO stack: every
//! return closes the most recent open call.

use super::stats::StatsTable;
use crate::parser::segmenter::EventBlock;
use log::trace;

/// An open hook call waiting for its return
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFrame {
    pub hook: String,
    pub start_ms: u64,
}

/// Stack of open hook calls, scoped to one block
#[derive(Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hook: impl Into<String>, start_ms: u64) {
        self.frames.push(CallFrame {
            hook: hook.into(),
            start_ms,
        });
    }

    pub fn pop(&mut self) -> Option<CallFrame> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Elapsed time of a whole block in milliseconds
///
/// Measured from the second line to the second-to-last line, floored at 1ms.
/// `None` if the block is too short or either end has no timestamp.
pub fn block_elapsed_ms(block: &EventBlock) -> Option<u64> {
    let lines = block.lines();
    if lines.len() < 3 {
        return None;
    }

    let begin = lines[1].timestamp()?;
    let end = lines[lines.len() - 2].timestamp()?;
    Some(end.saturating_sub(begin).max(1))
}

/// Match call/return hook pairs of `block` and record their durations
///
/// **Public** - used by the aggregation context for every valid block
///
/// Returns the number of samples recorded. Unmatched returns are ignored and
/// calls still open at the end of the block are discarded with it.
pub fn reconcile_calls(block: &EventBlock, functions: &mut StatsTable) -> usize {
    let mut stack = CallStack::new();
    let mut recorded = 0;

    for line in block.lines() {
        if line.is_call() {
            if let (Some(hook), Some(ts)) = (line.hook(), line.timestamp()) {
                stack.push(hook, ts);
            }
        } else if line.is_return() {
            let Some(frame) = stack.pop() else {
                trace!("Unmatched return ignored: {}", line.text());
                continue;
            };
            let Some(ts) = line.timestamp() else {
                continue;
            };

            let elapsed = ts.saturating_sub(frame.start_ms);
            if elapsed > 0 {
                functions.record(&frame.hook, elapsed);
                recorded += 1;
            }
        }
    }

    if !stack.is_empty() {
        trace!("{} hook calls left open at end of block", stack.depth());
    }

    recorded
}
