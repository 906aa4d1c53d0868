//! Line-level extraction of timestamps and hook names.
//!
//! Every instrumented line carries an `at[<ms>]` marker, usually followed by
//! the bracketed name of the hook that emitted it:
//!
//! ```text
//! at[1712][open] call(path=/tmp/x)
//! at[1715][open] returned
//! ```
//!
//! Extraction never fails. A line without a marker is simply a line without
//! a timestamp or hook name.

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::config::{CALL_MARKER, RETURN_MARKER};

static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"at\[([0-9]+)\]").expect("valid timestamp regex"));

static HOOK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"at\[[0-9]+\]\[(.*?)\]").expect("valid hook regex"));

static REQUEST_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*at\[[0-9]+\]\[.*?\]:\s*\+{3,}\s*REQUEST\s*\+{3,}")
        .expect("valid request start regex")
});

static REQUEST_END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*at\[[0-9]+\]\[.*?\]:\s*~{3,}\s*END REQUEST\s*~{3,}")
        .expect("valid request end regex")
});

/// Extract the first `at[<digits>]` timestamp of a line, in milliseconds
///
/// Returns `None` when the line has no marker or the digits do not fit a `u64`.
pub fn extract_timestamp(line: &str) -> Option<u64> {
    TIMESTAMP_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Extract the hook name of a line, i.e. `<name>` in `at[<digits>][<name>]`
pub fn extract_hook_name(line: &str) -> Option<&str> {
    HOOK_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|name| name.as_str())
}

/// Does this line open a server request block?
pub fn is_request_start(line: &str) -> bool {
    REQUEST_START_RE.is_match(line)
}

/// Does this line close a server request block?
pub fn is_request_end(line: &str) -> bool {
    REQUEST_END_RE.is_match(line)
}

/// One line of a trace with its derived fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
    text: String,
    timestamp: Option<u64>,
    hook: Option<String>,
}

impl TraceLine {
    /// Parse a raw line; trailing newline characters are dropped
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim_end_matches(&['\n', '\r'][..]).to_string();
        let timestamp = extract_timestamp(&text);
        let hook = extract_hook_name(&text)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        Self {
            text,
            timestamp,
            hook,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    /// Hook name, `None` when absent or empty
    pub fn hook(&self) -> Option<&str> {
        self.hook.as_deref()
    }

    /// Whitespace-only lines delimit syscall blocks
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Hook entry line
    pub fn is_call(&self) -> bool {
        self.text.contains(CALL_MARKER)
    }

    /// Hook exit line. A line that is also a call counts as a call only.
    pub fn is_return(&self) -> bool {
        !self.is_call() && self.text.contains(RETURN_MARKER)
    }
}
