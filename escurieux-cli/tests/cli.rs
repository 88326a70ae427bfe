//! Integration tests for the escurieux binary.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn escurieux(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_escurieux"))
        .args(args)
        .env_remove("ESCURIEUX_LOG")
        .output()
        .expect("failed to run escurieux")
}

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// Usage
// ============================================================================

#[test]
fn test_help_exits_zero() {
    let out = escurieux(&["-h"]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("escurieux [options] [filename]"));
}

#[test]
fn test_filename_required() {
    let out = escurieux(&[]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("Fatal error: Unless -h or --help is specified, a filename is required."));
    assert!(err.contains("Run escurieux -h or escurieux --help for help."));
}

#[test]
fn test_bytecode_and_compile_only_conflict() {
    let file = source_file("1");
    let path = file.path().to_str().unwrap();
    let out = escurieux(&["-b", "-c", path]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("cannot be used together"));
}

#[test]
fn test_bytecode_is_unimplemented() {
    let file = source_file("1");
    let out = escurieux(&["-b", file.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("The VM has not been implemented yet."));
}

#[test]
fn test_unknown_option() {
    let out = escurieux(&["--nope", "x"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).starts_with("Fatal error:"));
}

// ============================================================================
// Explain
// ============================================================================

#[test]
fn test_explain_code() {
    let out = escurieux(&["-e", "e00004"]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("E00004"));
}

#[test]
fn test_explain_unknown_code() {
    let out = escurieux(&["--explain", "E12345"]);
    assert_eq!(out.status.code(), Some(1));
}

// ============================================================================
// Compile
// ============================================================================

#[test]
fn test_compile_valid_file() {
    let file = source_file("let x = 1;\nx + 2");
    let out = escurieux(&["-c", file.path().to_str().unwrap()]);
    assert!(out.status.success(), "{}", stderr(&out));
}

#[test]
fn test_compile_reports_diagnostic() {
    let file = source_file("let a = 1;\nlet b = \"abc\n");
    let out = escurieux(&[file.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("[ESCE00004]"));
    assert!(err.contains("Note: the string was started here"));
    assert!(err.contains("On line 2 at character 9:"));
    assert!(err.contains("----------"));
}

#[test]
fn test_verbose_summary_reads_source_once() {
    let file = source_file("class A { private a: int }");
    let out = escurieux(&["-v", file.path().to_str().unwrap()]);
    assert!(out.status.success());
    let err = stderr(&out);
    assert!(err.contains("1 warning(s)"));
    assert!(err.contains("OK - No errors found"));
    assert!(!err.contains("tokenizing"));
}

#[test]
fn test_warnings_do_not_fail() {
    let file = source_file("class A { private a: int }");
    let out = escurieux(&[file.path().to_str().unwrap()]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("[ESCW00002]"));
}

#[test]
fn test_out_writes_json_tree() {
    let file = source_file("1 + 2");
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("tree.json");
    let flag = format!("--out={}", target.display());
    let out = escurieux(&[&flag, file.path().to_str().unwrap()]);
    assert!(out.status.success(), "{}", stderr(&out));
    let json = std::fs::read_to_string(&target).unwrap();
    assert!(json.contains("Infix"));
}

#[test]
fn test_missing_file() {
    let out = escurieux(&["/definitely/not/here.esc"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("cannot read"));
}
