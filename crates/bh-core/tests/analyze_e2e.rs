//! End-to-end CLI tests for the bh binary.
//!
//! These drive the compiled binary against fixture CSVs in a temp
//! directory and assert on outputs, exit codes, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const FIXTURE_CSV: &str = "\
tableId,tableName,username,startSession,endSession,gameType,limitType,smallBlind,bigBlind\n\
T1,Rio,A,2024-03-01 10:00:00,2024-03-01 11:00:00,NLHE,No Limit,0.5,1\n\
T1,Rio,B,2024-03-01 10:00:08,2024-03-01 11:05:00,NLHE,No Limit,0.5,1\n\
T1,Rio,C,2024-03-01 10:00:30,2024-03-01 10:45:00,NLHE,No Limit,0.5,1\n";

fn bh() -> Command {
    Command::cargo_bin("bh").unwrap()
}

fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let input = dir.join("sessions.csv");
    fs::write(&input, FIXTURE_CSV).unwrap();
    input
}

#[test]
fn analyze_writes_html_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let output = dir.path().join("report.html");

    bh().args(["analyze", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("report.html"));

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("const PAYLOAD ="));
}

#[test]
fn analyze_json_contains_expected_join() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let output = dir.path().join("analysis.json");

    bh().args(["analyze", "--format", "json", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();

    let joins = json["suspiciousJoins"].as_array().unwrap();
    assert_eq!(joins.len(), 1);
    assert_eq!(joins[0]["joiner"], "B");
    assert_eq!(joins[0]["preceding_player"], "A");
    assert_eq!(joins[0]["time_gap_sec"], 8.0);

    // B tops the hunter list; C stayed clean (22s gap > 15s threshold).
    let hunters = json["bumphunterProfiles"].as_array().unwrap();
    assert_eq!(hunters[0]["username"], "B");
    assert_eq!(hunters[0]["most_common_target"], "A");
    assert_eq!(hunters[0]["target_consistency"], 100);

    let targets = json["targetProfiles"].as_array().unwrap();
    assert_eq!(targets[0]["username"], "A");
    assert_eq!(targets[0]["joined_after_count"], 1);
}

#[test]
fn analyze_threshold_flag_changes_detection() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let output = dir.path().join("analysis.json");

    // 30-second threshold brings the C-after-B gap (22s) into range.
    bh().args(["analyze", "--format", "json", "--threshold", "30", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["suspiciousJoins"].as_array().unwrap().len(), 2);
}

#[test]
fn analyze_missing_input_fails_with_ingest_code() {
    let dir = tempfile::tempdir().unwrap();

    bh().current_dir(dir.path())
        .args(["analyze", "--input", "no-such-file.csv"])
        .assert()
        .code(11)
        .stderr(predicate::str::contains("Input File Not Found"));
}

#[test]
fn analyze_without_input_is_config_error() {
    let dir = tempfile::tempdir().unwrap();

    bh().current_dir(dir.path())
        .arg("analyze")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("no input file given"));
}

#[test]
fn analyze_nan_threshold_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());

    bh().args(["analyze", "--threshold", "NaN", "--input"])
        .arg(&input)
        .assert()
        .code(10)
        .stderr(predicate::str::contains("threshold_secs"));
}

#[test]
fn check_validates_settings_and_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());

    bh().args(["check", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("settings ok"))
        .stdout(predicate::str::contains("3 sessions"));
}

#[test]
fn check_rejects_invalid_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.json");
    fs::write(&settings, r#"{"threshold_secs": "not a number"}"#).unwrap();

    bh().arg("check")
        .arg("--config")
        .arg(&settings)
        .assert()
        .code(10)
        .stderr(predicate::str::contains("Invalid Settings File"));
}

#[test]
fn check_warns_on_non_positive_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.json");
    fs::write(&settings, r#"{"threshold_secs": 0}"#).unwrap();

    bh().arg("check")
        .arg("--config")
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning"));
}

#[test]
fn version_prints_version() {
    bh().arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bh "));
}
