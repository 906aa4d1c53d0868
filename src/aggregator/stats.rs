//! Per-category and per-function timing samples for one trace.
//!
//! Tables remember the order in which names were first seen. The reducer
//! uses that order to break ties between equal totals.

use super::call_stack::{block_elapsed_ms, reconcile_calls};
use crate::parser::dialect::TraceDialect;
use crate::parser::segmenter::EventBlock;
use log::{debug, trace};
use std::collections::HashMap;

/// Count and elapsed-time samples (ms) of one category or function
///
/// The count always equals the number of samples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimingStats {
    count: usize,
    samples: Vec<u64>,
}

impl TimingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence lasting `elapsed_ms`
    pub fn record(&mut self, elapsed_ms: u64) {
        self.count += 1;
        self.samples.push(elapsed_ms);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn samples(&self) -> &[u64] {
        &self.samples
    }

    /// Sum of all samples in milliseconds
    ///
    /// Widened to `u128` so that samples near `u64::MAX` cannot overflow.
    pub fn total_ms(&self) -> u128 {
        self.samples.iter().map(|&ms| u128::from(ms)).sum()
    }
}

/// Name -> stats mapping that keeps discovery order
#[derive(Debug, Clone, Default)]
pub struct StatsTable {
    entries: Vec<(String, TimingStats)>,
    index: HashMap<String, usize>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for `name`, creating an empty one on first sight
    pub fn entry(&mut self, name: &str) -> &mut TimingStats {
        let slot = match self.index.get(name) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push((name.to_string(), TimingStats::new()));
                self.index.insert(name.to_string(), slot);
                slot
            }
        };
        &mut self.entries[slot].1
    }

    /// Record one sample for `name`
    pub fn record(&mut self, name: &str, elapsed_ms: u64) {
        self.entry(name).record(elapsed_ms);
    }

    pub fn get(&self, name: &str) -> Option<&TimingStats> {
        self.index.get(name).map(|&slot| &self.entries[slot].1)
    }

    /// Entries in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TimingStats)> {
        self.entries
            .iter()
            .map(|(name, stats)| (name.as_str(), stats))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All mutable aggregation state of a single trace analysis
#[derive(Debug, Clone, Default)]
pub struct AggregationContext {
    categories: StatsTable,
    functions: StatsTable,
}

impl AggregationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event-level samples, keyed by syscall or request name
    pub fn categories(&self) -> &StatsTable {
        &self.categories
    }

    /// Internal hook samples, keyed by hook name
    pub fn functions(&self) -> &StatsTable {
        &self.functions
    }

    /// Account for one event block
    ///
    /// **Public** - called once per block, in file order
    ///
    /// Returns false when the block is noise for `dialect` and was ignored.
    /// A valid block always registers its category, even when its own
    /// elapsed time cannot be measured.
    pub fn process_block(&mut self, block: &EventBlock, dialect: TraceDialect) -> bool {
        let Some(category) = block.category(dialect) else {
            trace!("Ignoring {}-line block without {} header", block.len(), dialect);
            return false;
        };

        let entry = self.categories.entry(&category);
        match block_elapsed_ms(block) {
            Some(elapsed) => entry.record(elapsed),
            None => debug!("Block for '{}' has no usable timestamps, dropped", category),
        }

        reconcile_calls(block, &mut self.functions);
        true
    }
}
