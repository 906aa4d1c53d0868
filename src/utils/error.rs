//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while analysing one trace file
///
/// Malformed lines and blocks are never errors; they are dropped during
/// analysis. Only whole-file outcomes end up here.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("No valid timestamps found in {0}")]
    NoData(String),

    #[error("Cannot derive a process id from file name: {0}")]
    InvalidFileName(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
