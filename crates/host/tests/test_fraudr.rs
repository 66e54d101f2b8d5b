//! Process-level tests: exact stdout bytes and exit status of `fraudr`

use std::process::{Command, Output};

fn fraudr(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fraudr"))
        .args(args)
        .env_remove("FRAUD_REPORT")
        .env_remove("FRAUD_LOG")
        .output()
        .expect("failed to run fraudr")
}

fn assert_run(args: &[&str], stdout: &str, code: i32) {
    let out = fraudr(args);
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        stdout,
        "stdout of fraudr {:?}",
        args
    );
    assert_eq!(out.status.code(), Some(code), "status of fraudr {:?}", args);
}

#[test]
fn test_integer() {
    assert_run(&["value", r#"{"Int":7}"#], "7\n", 0);
    assert_run(&["value", r#"{"Int":-42}"#], "-42\n", 0);
}

#[test]
fn test_booleans() {
    assert_run(&["value", r#"{"Bool":true}"#], "#t\n", 0);
    assert_run(&["value", r#"{"Bool":false}"#], "#f\n", 0);
}

#[test]
fn test_char_eof_invalid() {
    assert_run(&["value", r#"{"Char":"a"}"#], "#\\a\n", 0);
    assert_run(&["value", r#""Eof""#], "#<eof>\n", 0);
    assert_run(&["value", r#""Invalid""#], "internal error\n", 0);
}

#[test]
fn test_void_prints_nothing() {
    assert_run(&["value", r#""Void""#], "", 0);
}

#[test]
fn test_raise_through_driver() {
    assert_run(&["raise"], "err\n", 1);
    assert_run(&["raise", "--message", "car: expected pair"], "err\n", 1);
}

#[test]
fn test_raise_with_partial_output() {
    assert_run(&["raise", "--partial", "abc"], "abcerr\n", 1);
}

#[test]
fn test_default_hook_exits_with_status_1() {
    assert_run(&["raise", "--no-driver"], "err\n", 1);
    assert_run(&["raise", "--no-driver", "--partial", "x"], "xerr\n", 1);
}

#[test]
fn test_report_goes_to_stderr_only() {
    let out = Command::new(env!("CARGO_BIN_EXE_fraudr"))
        .args(["raise", "--message", "boom"])
        .env("FRAUD_REPORT", "1")
        .output()
        .expect("failed to run fraudr");
    assert_eq!(out.stdout, b"err\n");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Outcome:    raised"), "stderr: {}", stderr);
    assert!(stderr.contains("Message:    boom"), "stderr: {}", stderr);
}

#[test]
fn test_bad_value_is_a_usage_error() {
    let out = fraudr(&["value", "{not json"]);
    assert!(out.stdout.is_empty());
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid value"));
}

#[test]
fn test_exiting_hook_keeps_partial_output() {
    assert_run(&["raise", "--partial", "partial ", "--exit-hook"], "partial err\n", 1);
    assert_run(&["raise", "--exit-hook"], "err\n", 1);
}

#[test]
fn test_value_help_marks_invalid_as_test_only() {
    let out = fraudr(&["value", "--help"]);
    assert_eq!(out.status.code(), Some(0));
    let help = String::from_utf8_lossy(&out.stdout);
    assert!(help.contains("Test host only"), "help: {}", help);
    assert!(help.contains("never produces it"), "help: {}", help);
}
