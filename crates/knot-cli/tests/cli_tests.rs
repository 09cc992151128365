//! Integration tests for the `knot` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the fmt, json,
//! and check subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the sample.knot fixture.
fn sample_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.knot")
}

/// Helper: path to the invalid.knot fixture.
fn invalid_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/invalid.knot")
}

// ─────────────────────────────────────────────────────────────────────────────
// Fmt subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fmt_stdin_to_stdout() {
    Command::cargo_bin("knot")
        .unwrap()
        .arg("fmt")
        .write_stdin("  a   1 /* noise */ 2\nb\n")
        .assert()
        .success()
        .stdout("a 1 2\nb\n");
}

#[test]
fn fmt_file_to_stdout() {
    Command::cargo_bin("knot")
        .unwrap()
        .args(["fmt", "-i", sample_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("server port=8080"))
        .stdout(predicate::str::contains("    limits cpu=1.5 mem=0x100\n"));
}

#[test]
fn fmt_file_to_file() {
    let output_path = "/tmp/knot-test-fmt-output.knot";
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("knot")
        .unwrap()
        .args(["fmt", "-i", sample_path(), "-o", output_path])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    assert!(content.contains("package {"));
    assert!(content.ends_with('\n'));

    let _ = std::fs::remove_file(output_path);
}

#[test]
fn fmt_drops_suppressed_units() {
    Command::cargo_bin("knot")
        .unwrap()
        .args(["fmt", "-i", sample_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("debug").not());
}

#[test]
fn fmt_is_idempotent() {
    let first = Command::cargo_bin("knot")
        .unwrap()
        .args(["fmt", "-i", sample_path()])
        .output()
        .expect("fmt should succeed");
    assert!(first.status.success());
    let canonical = String::from_utf8(first.stdout).expect("output should be UTF-8");

    Command::cargo_bin("knot")
        .unwrap()
        .arg("fmt")
        .write_stdin(canonical.clone())
        .assert()
        .success()
        .stdout(canonical);
}

#[test]
fn fmt_invalid_input_fails() {
    Command::cargo_bin("knot")
        .unwrap()
        .arg("fmt")
        .write_stdin("name \"unterminated")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Json subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn json_structure_matches_document() {
    let output = Command::cargo_bin("knot")
        .unwrap()
        .args(["json", "-i", sample_path()])
        .output()
        .expect("json should succeed");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("output should be valid JSON");
    let nodes = value.as_array().expect("top level is an array");
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0]["name"], "package");
    assert_eq!(nodes[1]["name"], "server");
    assert_eq!(nodes[1]["properties"]["port"], 8080);
    assert_eq!(nodes[1]["properties"]["host"], "localhost");

    let limits = &nodes[1]["children"][0];
    assert_eq!(limits["name"], "limits");
    assert_eq!(limits["properties"]["cpu"], 1.5);
    assert_eq!(limits["properties"]["mem"], 256);
}

#[test]
fn json_keeps_hints_and_keywords() {
    let output = Command::cargo_bin("knot")
        .unwrap()
        .arg("json")
        .write_stdin("(widget)w (len)3 on=true off=null\n")
        .output()
        .expect("json should succeed");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("output should be valid JSON");
    let node = &value[0];
    assert_eq!(node["name"], "w");
    assert_eq!(node["type"], "widget");
    assert_eq!(node["values"][0]["type"], "len");
    assert_eq!(node["values"][0]["value"], 3);
    assert_eq!(node["properties"]["on"], true);
    assert_eq!(node["properties"]["off"], serde_json::Value::Null);
}

#[test]
fn json_empty_document_is_empty_array() {
    Command::cargo_bin("knot")
        .unwrap()
        .arg("json")
        .write_stdin("// nothing here\n")
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn json_invalid_input_fails() {
    Command::cargo_bin("knot")
        .unwrap()
        .args(["json", "-i", invalid_path()])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_valid_document() {
    Command::cargo_bin("knot")
        .unwrap()
        .args(["check", "-i", sample_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: 2 top-level node(s)"));
}

#[test]
fn check_invalid_document_fails() {
    Command::cargo_bin("knot")
        .unwrap()
        .args(["check", "-i", invalid_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid document"))
        .stderr(predicate::str::contains("property"));
}

#[test]
fn check_missing_file_fails() {
    Command::cargo_bin("knot")
        .unwrap()
        .args(["check", "-i", "/nonexistent/path.knot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// General CLI behavior
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("knot")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fmt"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("knot")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("unrecognized")));
}
