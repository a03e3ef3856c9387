//! Integration tests for the `anyv` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the kind, tree,
//! convert and check subcommands through the actual binary, including
//! stdin/stdout piping, file I/O, format inference and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn anyv() -> Command {
    Command::cargo_bin("anyv").unwrap()
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("anyv-test-{}-{}", std::process::id(), name))
}

// ─────────────────────────────────────────────────────────────────────────────
// kind subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn kind_from_stdin_defaults_to_json() {
    anyv()
        .arg("kind")
        .write_stdin(r#"["1", true]"#)
        .assert()
        .success()
        .stdout("array\n");
}

#[test]
fn kind_quoted_number_is_string() {
    anyv()
        .arg("kind")
        .write_stdin(r#""1""#)
        .assert()
        .success()
        .stdout("string\n");
}

#[test]
fn kind_yaml_stdin_with_explicit_format() {
    anyv()
        .args(["kind", "--from", "yaml"])
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout("int\n");

    anyv()
        .args(["kind", "--from", "yaml"])
        .write_stdin("'1'\n")
        .assert()
        .success()
        .stdout("string\n");
}

#[test]
fn kind_infers_yaml_from_extension() {
    anyv()
        .args(["kind", "-i", &fixture("records.yaml")])
        .assert()
        .success()
        .stdout("array\n");
}

#[test]
fn kind_rejects_float() {
    anyv()
        .arg("kind")
        .write_stdin("1.5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized value shape: 1.5"));
}

#[test]
fn kind_missing_file_fails() {
    anyv()
        .args(["kind", "-i", "/nonexistent/anyv/input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// tree subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tree_outlines_nested_kinds() {
    let expected = "\
array[3]
  0: string \"1\"
  1: bool true
  2: stringMap{2}
    key1: string \"1\"
    key2: int 2
";
    anyv()
        .arg("tree")
        .write_stdin(r#"["1", true, {"key1": "1", "key2": 2}]"#)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn tree_shows_empty_aggregates_and_null() {
    anyv()
        .arg("tree")
        .write_stdin(r#"{"a": [], "b": {}, "c": null}"#)
        .assert()
        .success()
        .stdout("stringMap{3}\n  a: array[0]\n  b: stringMap{0}\n  c: null\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// convert subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn convert_yaml_fixture_to_json() {
    let output = anyv()
        .args(["convert", "-i", &fixture("records.yaml"), "--to", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let converted: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let expected: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(fixture("records.json")).unwrap()).unwrap();
    let expected_items = &expected.as_array().unwrap()[..7];
    assert_eq!(converted.as_array().unwrap().as_slice(), expected_items);
}

#[test]
fn convert_keeps_quoted_numbers_as_strings() {
    anyv()
        .args(["convert", "--from", "yaml", "--to", "json"])
        .write_stdin("a: \"1\"\nb: 1\n")
        .assert()
        .success()
        .stdout("{\"a\":\"1\",\"b\":1}\n");
}

#[test]
fn convert_output_ends_with_newline_in_both_formats() {
    for (to, extra) in [("json", None), ("json", Some("--pretty")), ("yaml", None)] {
        let mut cmd = anyv();
        cmd.args(["convert", "--to", to]);
        if let Some(flag) = extra {
            cmd.arg(flag);
        }
        let output = cmd.write_stdin(r#"{"k":[1]}"#).output().unwrap();
        assert!(output.status.success());
        assert!(output.stdout.ends_with(b"\n"), "--to {to} {extra:?}");
        assert!(!output.stdout.ends_with(b"\n\n"), "--to {to} {extra:?}");
    }
}

#[test]
fn convert_pretty_json() {
    anyv()
        .args(["convert", "--to", "json", "--pretty"])
        .write_stdin(r#"{"k":[1]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"k\": [\n"));
}

#[test]
fn convert_json_to_yaml_file_and_back() {
    let yaml_path = temp_path("records.yaml");
    let _ = std::fs::remove_file(&yaml_path);

    anyv()
        .args(["convert", "-i", &fixture("records.json"), "--to", "yaml", "-o"])
        .arg(&yaml_path)
        .assert()
        .success()
        .stdout("");

    let yaml_text = std::fs::read_to_string(&yaml_path).expect("output file must exist");
    assert!(yaml_text.contains("value: '1'"));

    let output = anyv()
        .args(["convert", "--to", "json", "-i"])
        .arg(&yaml_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let back: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let original: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(fixture("records.json")).unwrap()).unwrap();
    assert_eq!(back, original);

    let _ = std::fs::remove_file(&yaml_path);
}

#[test]
fn convert_float_fixture_fails() {
    anyv()
        .args(["convert", "-i", &fixture("float.json"), "--to", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode JSON input"))
        .stderr(predicate::str::contains("unrecognized value shape"));
}

#[test]
fn convert_requires_target_format() {
    anyv()
        .arg("convert")
        .write_stdin("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--to"));
}

// ─────────────────────────────────────────────────────────────────────────────
// check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_matching_kind_succeeds() {
    anyv()
        .args(["check", "-i", &fixture("records.json"), "--expect", "array"])
        .assert()
        .success()
        .stdout("ok: array\n");
}

#[test]
fn check_kind_name_is_case_insensitive() {
    anyv()
        .args(["check", "--expect", "STRINGMAP"])
        .write_stdin("{}")
        .assert()
        .success();
}

#[test]
fn check_mismatch_exits_one() {
    anyv()
        .args(["check", "-i", &fixture("records.json"), "--expect", "stringMap"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected stringMap, found array"));
}

#[test]
fn check_unknown_kind_is_invalid_tag() {
    anyv()
        .args(["check", "--expect", "float"])
        .write_stdin("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid tag: float"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verbose_logs_go_to_stderr() {
    anyv()
        .args(["-vv", "kind"])
        .env_remove("RUST_LOG")
        .write_stdin("[1]")
        .assert()
        .success()
        .stdout("array\n")
        .stderr(predicate::str::contains("sniffed JSON value"));
}
