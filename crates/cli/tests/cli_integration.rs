//! CLI integration tests for all subcommands.
//!
//! Uses `assert_cmd` to spawn the `inseq` binary and verify
//! exit codes, stdout content, and stderr content.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn inseq() -> Command {
    let mut cmd = cargo_bin_cmd!("inseq");
    cmd.env_remove("RUST_LOG");
    cmd
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    inseq()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Input-sequence language toolchain"));
}

#[test]
fn version_exits_0() {
    inseq()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("inseq"));
}

// ──────────────────────────────────────────────
// 2. Parse subcommand
// ──────────────────────────────────────────────

#[test]
fn parse_prints_canonical_intervals() {
    inseq()
        .args(["parse", "1 3; 7 5; 0;", "--years-to-maturity", "10"])
        .assert()
        .success()
        .stdout("1 [0, 3)\n7 [3, 5)\n0 [5, 6)\n");
}

#[test]
fn parse_invalid_exits_1_with_abridged_message() {
    inseq()
        .args(["parse", "5 3; 2 1;", "--years-to-maturity", "10"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(
            "Interval [ 3, 1 ) is improper: it ends before it begins.",
        ))
        .stderr(predicate::str::contains("Current token").not());
}

#[test]
fn parse_json_includes_diagnostics() {
    let out = inseq()
        .args([
            "--output",
            "json",
            "parse",
            "1[2,5 7",
            "--years-to-maturity",
            "10",
        ])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(v["intervals"].as_array().map(Vec::len), Some(0));
    assert_eq!(
        v["diagnostics"][0]["text"],
        "Expected ')' or ']'. Current token 'number' at position 7."
    );
}

#[test]
fn parse_json_success_lists_modes() {
    let out = inseq()
        .args([
            "--output",
            "json",
            "parse",
            "1 @50; 0",
            "--years-to-maturity",
            "30",
            "--issue-age",
            "45",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(v["intervals"][0]["end"], 5);
    assert_eq!(v["intervals"][0]["end_mode"], "attained_age");
    assert_eq!(v["intervals"][1]["end_mode"], "maturity");
    assert_eq!(v["canonical"], "1 [0, 5); 0 [5, 30)");
}

#[test]
fn parse_keywords_from_flags() {
    inseq()
        .args([
            "parse",
            "glp 5; sevenpay",
            "--years-to-maturity",
            "7",
            "--keyword",
            "glp",
            "--keyword",
            "sevenpay",
            "--keywords-only",
        ])
        .assert()
        .success()
        .stdout("glp [0, 5)\nsevenpay [5, 7)\n");
}

#[test]
fn parse_without_maturity_is_config_error() {
    inseq()
        .args(["parse", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("years to maturity is required"));
}

#[test]
fn parse_reads_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("contract.toml");
    fs::write(
        &config,
        "[sequence]\nyears_to_maturity = 40\nissue_age = 40\nretirement_age = 65\n",
    )
    .unwrap();

    inseq()
        .args(["parse", "1000 retirement; 0", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout("1000 [0, 25)\n0 [25, 40)\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn parse_missing_config_file_exits_1() {
    inseq()
        .args([
            "parse",
            "0",
            "--config",
            "no/such/config.toml",
            "--years-to-maturity",
            "5",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not read"));
}

#[test]
fn verbose_logs_committed_intervals() {
    inseq()
        .args(["--verbose", "parse", "1 3", "--years-to-maturity", "5"])
        .assert()
        .success()
        .stderr(predicate::str::contains("committed interval"));
}

// ──────────────────────────────────────────────
// 3. Check subcommand
// ──────────────────────────────────────────────

#[test]
fn check_reports_failing_lines() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("fields.txt");
    fs::write(&file, "# premiums\n1 3; 2\n\n5 3; 2 1\n0\n").unwrap();

    inseq()
        .args(["check", "--years-to-maturity", "10"])
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            ":4: Interval [ 3, 1 ) is improper: it ends before it begins.",
        ))
        .stderr(predicate::str::contains("checked 3 expressions, 1 failed"));
}

#[test]
fn check_all_valid_exits_0() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("fields.txt");
    fs::write(&file, "1 3; 2\n100 [2, 5)\n").unwrap();

    inseq()
        .args(["--quiet", "check", "--years-to-maturity", "10"])
        .arg(&file)
        .assert()
        .success()
        .stdout("")
        .stderr("");
}

// ──────────────────────────────────────────────
// 4. Abridge subcommand
// ──────────────────────────────────────────────

#[test]
fn abridge_prints_first_sentence() {
    inseq()
        .args([
            "abridge",
            "Expected ')' or ']'. Current token 'number' at position 7.\n",
        ])
        .assert()
        .success()
        .stdout("Expected ')' or ']'.\n");
}

#[test]
fn abridge_empty_exits_1() {
    inseq()
        .args(["abridge", ""])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot abridge an empty diagnostic"));
}
