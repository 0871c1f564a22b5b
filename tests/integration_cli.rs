//! Integration tests for the claim-validator binary
//!
//! These run the compiled binary and check the exit code contract:
//! 0 valid, 1 Error findings present, 2 runtime or usage error.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

const VALID_FILE: &str = "HEAD\t1.0\tBasicProfile\tMSG-1\t2024-03-01T10:00:00Z\tPADPIDA2014120301U\tExample DSP\tPADPIDA2017051201Z\tExample Society
SY02\tSR-1\tExampleMusicPremium\tSubscriptionModel\tOnDemandStream\tUS\t2024-01\t2024-01\tOwned\tUSD\t\t\t75\t25\t100.00
CD01\tCLM-1\tSR-1\tUSRC17607839\t\tExample Work\t\t\t\t\t50\t25\t43.75\t75.00\t25.00\t100.00
FOOT\t4\t1
";

fn claim_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_claim-validator"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_valid_file_exits_zero() {
    let file = claim_file(VALID_FILE);
    let output = run(&["validate", "-q", file.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("VALID"));
}

#[test]
fn test_invalid_file_exits_one() {
    let file = claim_file(&VALID_FILE.replace("FOOT\t4\t1", "FOOT\t4\t2"));
    let output = run(&["validate", "-q", "--format", "json", file.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["findings"][0]["kind"], "Structural");
}

#[test]
fn test_missing_file_exits_one() {
    let output = run(&["validate", "-q", "/nonexistent/claims.tsv"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_warnings_as_errors_flips_exit_code() {
    let file = claim_file(&VALID_FILE.replace("ExampleMusicPremium", "Example Music Premium"));
    let path = file.path().to_str().unwrap();

    assert_eq!(run(&["validate", "-q", path]).status.code(), Some(0));
    assert_eq!(
        run(&["validate", "-q", "--warnings-as-errors", path]).status.code(),
        Some(1)
    );
}

#[test]
fn test_bad_config_exits_two() {
    let file = claim_file(VALID_FILE);
    let config = claim_file("{ not json");
    let output = run(&[
        "validate",
        "-q",
        "--config",
        config.path().to_str().unwrap(),
        file.path().to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_stdin_input() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_claim-validator"))
        .args(["validate", "-q", "--format", "csv", "-"])
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(VALID_FILE.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "line,recordType,field,message,severity,kind");
}

#[test]
fn test_config_command_prints_defaults() {
    let config = claim_file("{}");
    let output = run(&["config", "--config", config.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["amount_tolerance"], "0.02");
    assert!(json["allowed_values"]["currencies"].is_array());
}

#[test]
fn test_amount_tolerance_override() {
    // Components 75.00 + 25.00 against a detail total of 100.04
    let content = VALID_FILE
        .replace("\t75.00\t25.00\t100.00", "\t75.00\t25.00\t100.04")
        .replace("\t75\t25\t100.00", "\t75\t25\t100.04");
    let file = claim_file(&content);
    let path = file.path().to_str().unwrap();

    assert_eq!(run(&["validate", "-q", path]).status.code(), Some(1));
    assert_eq!(
        run(&["validate", "-q", "--amount-tolerance", "0.05", path])
            .status
            .code(),
        Some(0)
    );
}

#[test]
fn test_config_command_shows_overrides() {
    let config = claim_file(r#"{"share_tolerance": "0.02"}"#);
    let output = run(&[
        "config",
        "--config",
        config.path().to_str().unwrap(),
        "--share-tolerance",
        "0.5",
        "--progress-interval",
        "100",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["share_tolerance"], "0.5");
    assert_eq!(json["amount_tolerance"], "0.02");
    assert_eq!(json["progress_interval"], 100);
}

#[test]
fn test_invalid_override_exits_two() {
    let file = claim_file(VALID_FILE);
    let config = claim_file("{}");
    let output = run(&[
        "validate",
        "-q",
        "--config",
        config.path().to_str().unwrap(),
        "--progress-interval",
        "0",
        file.path().to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
}
