//! Trace dialects and their detection from file names.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::utils::config::POSIX_NAME_MARKER;

/// Block delimitation and naming convention of a trace file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TraceDialect {
    /// Syscall interception trace: `+` headed blocks separated by blank lines
    Syscall,
    /// Server trace: `+++ REQUEST +++` .. `~~~ END REQUEST ~~~` blocks
    Request,
}

impl TraceDialect {
    /// Guess the dialect from a file name
    ///
    /// A name containing `posix` (any case) is a syscall trace, anything else
    /// is treated as a server request trace.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());

        if name.to_lowercase().contains(POSIX_NAME_MARKER) {
            Self::Syscall
        } else {
            Self::Request
        }
    }

    /// Trace kind label carried by results (`posix` / `server`)
    pub fn kind_label(self) -> &'static str {
        match self {
            Self::Syscall => "posix",
            Self::Request => "server",
        }
    }

    /// First column label of the category table
    pub fn category_label(self) -> &'static str {
        match self {
            Self::Syscall => "SYSCALL",
            Self::Request => "REQUEST",
        }
    }
}

impl fmt::Display for TraceDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syscall => write!(f, "syscall"),
            Self::Request => write!(f, "request"),
        }
    }
}
