//! CAPIO Profiler
//!
//! Timing statistics for CAPIO trace logs. A trace records intercepted
//! POSIX system calls (`posix_*` files) or server requests (`server_*`
//! files) as blocks of timestamped lines. This crate groups those blocks
//! into categories, pairs internal function calls with their returns and
//! reports per-name counts, totals, means and spreads.
//!
//! This crate provides the core implementation for the
//! `capio-profiler` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! capio-profiler analyze --file traces/posix_1234.log
//! capio-profiler batch --root traces --output report.json
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
