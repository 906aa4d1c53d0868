use capio_profiler::parser::{
    analyze_file, extract_hook_name, extract_timestamp, parse_process_id, parse_trace,
    split_blocks, to_trace_result, TraceDialect,
};
use capio_profiler::utils::AnalysisError;
use pretty_assertions::assert_eq;
use std::path::Path;

#[test]
fn test_extractors() {
    assert_eq!(extract_timestamp("at[1234][open] call(x)"), Some(1234));
    assert_eq!(extract_timestamp("no stamp here"), None);
    assert_eq!(extract_hook_name("at[1234][open] call(x)"), Some("open"));
    assert_eq!(extract_hook_name("at[1234] open"), None);
}

#[test]
fn test_dialect_from_path() {
    assert_eq!(
        TraceDialect::from_path(Path::new("logs/POSIX_12.log")),
        TraceDialect::Syscall
    );
    assert_eq!(
        TraceDialect::from_path(Path::new("logs/server_12.log")),
        TraceDialect::Request
    );
}

#[test]
fn test_syscall_blocks_split_on_blank_lines() {
    let text = "+ at[1][x] open\nat[2][open] call()\n\n\n+ at[3][x] read\nat[4][read] call()\n";
    let blocks = split_blocks(TraceDialect::Syscall, text);

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].category(TraceDialect::Syscall).as_deref(), Some("open"));
    assert_eq!(blocks[1].category(TraceDialect::Syscall).as_deref(), Some("read"));
}

#[test]
fn test_request_without_end_is_closed_by_next_start() {
    let text = "\
at[1][s]: +++ REQUEST +++
at[2][a_handler] call()
at[3][s]: +++ REQUEST +++
at[4][b_handler] call()
at[5][b_handler] returned
at[6][s]: ~~~ END REQUEST ~~~
";
    let blocks = split_blocks(TraceDialect::Request, text);

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].len(), 2);
    assert_eq!(
        blocks[1].category(TraceDialect::Request).as_deref(),
        Some("b_handler")
    );
}

#[test]
fn test_total_exec_time() {
    let parsed = parse_trace("at[1000]\n\nat[5500]\n".as_bytes(), TraceDialect::Syscall).unwrap();
    let result = to_trace_result(&parsed, 3, "mem").unwrap();

    assert_eq!(result.total_exec_secs, 4.5);
    assert_eq!(result.pid, 3);
}

#[test]
fn test_no_data() {
    let parsed = parse_trace("just words\n".as_bytes(), TraceDialect::Request).unwrap();
    assert!(matches!(
        to_trace_result(&parsed, 3, "mem"),
        Err(AnalysisError::NoData(_))
    ));
}

#[test]
fn test_analyze_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posix_4321.log");
    std::fs::write(
        &path,
        "\
+ at[1000][x] write
at[1000][write] call(1)
at[1400][write] returned

+ at[1500][x] read
at[1500][read] call(1)
at[1600][read] returned

+ at[2000][x] write
at[2000][write] call(1)
at[3000][write] returned
",
    )
    .unwrap();

    let result = analyze_file(&path, None).unwrap();

    assert_eq!(result.pid, 4321);
    assert_eq!(result.trace_kind, "posix");
    assert_eq!(result.total_exec_secs, 2.0);
    assert_eq!(result.categories.headers[0], "SYSCALL");

    let names: Vec<&str> = result.categories.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["write", "read"]);
    // block time runs from the call line to itself, so each block floors at 1ms
    assert_eq!(result.categories.rows[0].events, 2);
    assert_eq!(result.functions.rows[0].name, "write");
    assert_eq!(result.functions.rows[0].total_secs, 1.4);
}

#[test]
fn test_forced_dialect_overrides_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posix_5.log");
    std::fs::write(
        &path,
        "at[1][s]: +++ REQUEST +++\nat[2][x_handler] call()\nat[9][x_handler] returned\nat[10][s]: ~~~ END REQUEST ~~~\n",
    )
    .unwrap();

    let result = analyze_file(&path, Some(TraceDialect::Request)).unwrap();

    assert_eq!(result.trace_kind, "server");
    assert_eq!(result.categories.rows[0].name, "x_handler");
    assert_eq!(result.categories.rows[0].total_secs, 0.007);
}

#[test]
fn test_invalid_file_name() {
    assert!(matches!(
        parse_process_id(Path::new("posix_trace.log")),
        Err(AnalysisError::InvalidFileName(_))
    ));
    assert!(matches!(
        analyze_file(Path::new("posix_trace.log"), None),
        Err(AnalysisError::InvalidFileName(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        analyze_file(&dir.path().join("posix_1.log"), None),
        Err(AnalysisError::Io(_))
    ));
}
