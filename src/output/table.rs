//! Plain-text rendering of trace results for the terminal.

use crate::parser::schema::{SummaryTable, TraceResult};

const MAX_NAME_WIDTH: usize = 40;
const NUMBER_WIDTH: usize = 14;

/// Render the header line and both tables of a trace
///
/// **Public** - used by commands for `--summary` output
///
/// At most `max_rows` rows are printed per table.
pub fn render_trace(trace: &TraceResult, max_rows: usize) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Trace: {} | PID: {} | Total Exec Time: {:.3}s",
        trace.trace_kind, trace.pid, trace.total_exec_secs
    ));
    lines.push(String::new());
    lines.push("  GLOBAL VIEW".to_string());
    lines.extend(render_table(&trace.categories, max_rows));
    lines.push(String::new());
    lines.push("  INTERNAL FUNCTIONS".to_string());
    lines.extend(render_table(&trace.functions, max_rows));

    lines.join("\n")
}

/// Render one summary table as aligned text lines
fn render_table(table: &SummaryTable, max_rows: usize) -> Vec<String> {
    if table.is_empty() {
        return vec!["  (no entries)".to_string()];
    }

    let name_width = table
        .rows
        .iter()
        .map(|row| row.name.chars().count())
        .chain(table.headers.first().map(|h| h.chars().count()))
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH);

    let mut lines = Vec::new();

    let mut header = format!("  {:<width$}", first_header(table), width = name_width);
    for label in table.headers.iter().skip(1) {
        header.push_str(&format!(" {:>width$}", label, width = NUMBER_WIDTH));
    }
    lines.push(header.trim_end().to_string());
    lines.push(format!(
        "  {}",
        "-".repeat(name_width + (NUMBER_WIDTH + 1) * table.headers.len().saturating_sub(1))
    ));

    for row in table.rows.iter().take(max_rows) {
        lines.push(format!(
            "  {:<nw$} {:>w$} {:>w$.4} {:>w$.6} {:>w$.6} {:>w$.6} {:>w$.6}",
            truncate_name(&row.name, name_width),
            row.events,
            row.share,
            row.total_secs,
            row.average_secs,
            row.std_dev_secs,
            row.variance_secs2,
            nw = name_width,
            w = NUMBER_WIDTH,
        ));
    }

    if table.rows.len() > max_rows {
        lines.push(format!(
            "  (Showing top {} of {} entries)",
            max_rows,
            table.rows.len()
        ));
    }

    lines
}

fn first_header(table: &SummaryTable) -> &str {
    table.headers.first().map(String::as_str).unwrap_or("")
}

/// Shorten a name to `width` characters, marking the cut with `~`
fn truncate_name(name: &str, width: usize) -> String {
    if name.chars().count() <= width || width == 0 {
        return name.to_string();
    }
    let mut short: String = name.chars().take(width - 1).collect();
    short.push('~');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::SummaryRow;

    fn row(name: &str, total_secs: f64) -> SummaryRow {
        SummaryRow {
            name: name.to_string(),
            events: 1,
            share: 1.0,
            total_secs,
            average_secs: total_secs,
            std_dev_secs: 0.0,
            variance_secs2: 0.0,
        }
    }

    fn trace(rows: Vec<SummaryRow>) -> TraceResult {
        TraceResult {
            pid: 42,
            trace_kind: "posix".to_string(),
            total_exec_secs: 1.25,
            categories: SummaryTable {
                headers: vec!["SYSCALL".to_string(), "Events".to_string()],
                rows,
            },
            functions: SummaryTable {
                headers: vec!["__FUNCTION__".to_string()],
                rows: Vec::new(),
            },
        }
    }

    #[test]
    fn test_render_trace() {
        let text = render_trace(&trace(vec![row("write", 1.5), row("read", 0.5)]), 10);

        assert!(text.starts_with("Trace: posix | PID: 42 | Total Exec Time: 1.250s"));
        assert!(text.contains("SYSCALL"));
        assert!(text.contains("write"));
        assert!(text.contains("1.500000"));
        assert!(text.contains("(no entries)"));
    }

    #[test]
    fn test_render_limits_rows() {
        let rows = (0..5).map(|i| row(&format!("call{}", i), 1.0)).collect();
        let text = render_trace(&trace(rows), 2);

        assert!(text.contains("call1"));
        assert!(!text.contains("call2"));
        assert!(text.contains("(Showing top 2 of 5 entries)"));
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("short", 10), "short");
        assert_eq!(truncate_name("abcdefghij", 5), "abcd~");
    }
}
