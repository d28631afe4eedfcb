//! Drives the `claimscan` binary end to end in temporary directories.

use std::path::Path;
use std::process::{Command, Output};

const HEADER: &str = "HCPCS Code,HCPCS Description,Rendering NPI,Place Of Service,\
Average Submitted Charge Amount,Average Medicare Allowed Amount,Average Medicare Payment Amount\n";

/// Forty office visits paying $100, one paying $1,000.
fn raw_extract(dir: &Path) -> std::path::PathBuf {
    let mut csv = String::from(HEADER);
    for i in 0..40 {
        let pay = if i == 11 { "\"$1,000.00\"" } else { "$100.00" };
        csv.push_str(&format!("99213,Office visit,{},O,$250.00,120,{}\n", 1_000 + i, pay));
    }
    let path = dir.join("raw.csv");
    std::fs::write(&path, csv).unwrap();
    path
}

fn claimscan(cwd: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_claimscan"));
    cmd.current_dir(cwd).args(args);
    for key in [
        "CLAIMSCAN_GROUP_COLUMN",
        "CLAIMSCAN_MIN_GROUP_SIZE",
        "CLAIMSCAN_Z_THRESHOLD",
        "CLAIMSCAN_IQR_MULTIPLIER",
        "CLAIMSCAN_COST_COLUMN",
        "CLAIMSCAN_MAX_EXPORT_RECORDS",
    ] {
        cmd.env_remove(key);
    }
    cmd.output().unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn run_writes_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let input = raw_extract(dir.path());
    let out = dir.path().join("outputs");

    let output = claimscan(
        dir.path(),
        &["run", "--input", input.to_str().unwrap(), "--out-dir", out.to_str().unwrap()],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    for rel in [
        "data/healthcare_cleaned.csv",
        "report/01_cleaning_profile.txt",
        "report/02_analysis_summary.txt",
        "anomalies/anomalies_iqr.csv",
        "anomalies/anomalies_zscore.csv",
        "tables/top_iqr_groups.csv",
        "tables/top_zscore_groups.csv",
        "summary.json",
        "anomalies.json",
        "top_groups.json",
    ] {
        assert!(out.join(rel).is_file(), "missing {rel}");
    }

    let anomalies = read_json(&out.join("anomalies.json"));
    let records = anomalies.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["avg_mdcr_pymt_amt"], 1000.0);
    assert_eq!(records[0]["place_of_srvc_label"], "Office");

    let summary = read_json(&out.join("summary.json"));
    assert_eq!(summary["rows"], 40);
    assert_eq!(summary["iqr_anomalies_count"], 1);
}

#[test]
fn clean_then_analyze_matches_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = raw_extract(dir.path());
    let staged = dir.path().join("staged");
    let combined = dir.path().join("combined");

    let clean = claimscan(
        dir.path(),
        &["clean", "--input", input.to_str().unwrap(), "--out-dir", staged.to_str().unwrap()],
    );
    assert!(clean.status.success());
    assert!(!staged.join("anomalies.json").exists());

    let cleaned = staged.join("data/healthcare_cleaned.csv");
    let analyze = claimscan(
        dir.path(),
        &["analyze", "--input", cleaned.to_str().unwrap(), "--out-dir", staged.to_str().unwrap()],
    );
    assert!(analyze.status.success());

    let run = claimscan(
        dir.path(),
        &["run", "--input", input.to_str().unwrap(), "--out-dir", combined.to_str().unwrap()],
    );
    assert!(run.status.success());

    for rel in ["anomalies.json", "summary.json", "top_groups.json"] {
        assert_eq!(
            std::fs::read_to_string(staged.join(rel)).unwrap(),
            std::fs::read_to_string(combined.join(rel)).unwrap(),
            "{rel} differs"
        );
    }
}

#[test]
fn min_group_size_flag_overrides_default() {
    let dir = tempfile::tempdir().unwrap();
    let input = raw_extract(dir.path());
    let out = dir.path().join("outputs");

    let output = claimscan(
        dir.path(),
        &[
            "run",
            "--min-group-size",
            "41",
            "--input",
            input.to_str().unwrap(),
            "--out-dir",
            out.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());
    assert_eq!(read_json(&out.join("anomalies.json")), serde_json::json!([]));
    let report = std::fs::read_to_string(out.join("report/02_analysis_summary.txt")).unwrap();
    assert!(report.contains("min_group_size_used: 41"));
}

#[test]
fn empty_extract_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.csv");
    std::fs::write(&input, HEADER).unwrap();
    let out = dir.path().join("outputs");

    let output = claimscan(
        dir.path(),
        &["run", "--input", input.to_str().unwrap(), "--out-dir", out.to_str().unwrap()],
    );
    assert!(!output.status.success());
    assert!(!out.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: analysis failed: "), "{stderr}");
    assert!(stderr.contains("[EMPTY_INPUT]"), "{stderr}");
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = raw_extract(dir.path());

    let output = claimscan(
        dir.path(),
        &["--config", "nope.toml", "clean", "--input", input.to_str().unwrap()],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[CONFIG_ERROR] Config file not found: nope.toml"), "{stderr}");
}
