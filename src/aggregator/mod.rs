//! Aggregation of event blocks into timing statistics.
//!
//! This module transforms event blocks into:
//! - Per-category samples (one per syscall or request)
//! - Per-function samples (one per matched hook call/return)
//! - Ranked summary rows with share, mean and spread

pub mod call_stack;
pub mod reducer;
pub mod stats;

// Re-export main types and functions
pub use call_stack::{block_elapsed_ms, reconcile_calls, CallFrame, CallStack};
pub use reducer::reduce_table;
pub use stats::{AggregationContext, StatsTable, TimingStats};
