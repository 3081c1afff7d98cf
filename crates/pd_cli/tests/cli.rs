//! Black-box tests for the `pdash` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn pdash() -> Command {
    Command::cargo_bin("pdash").expect("binary")
}

fn snapshot(json: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    f.write_all(json.as_bytes()).expect("write");
    f
}

#[test]
fn default_run_prints_a_summary_spec() {
    pdash()
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"summary\""));
}

#[test]
fn synthetic_runs_are_deterministic_per_seed() {
    let a = pdash().args(["--quiet", "--seed", "7"]).output().expect("run");
    let b = pdash().args(["--quiet", "--seed", "7"]).output().expect("run");
    assert_eq!(a.stdout, b.stdout);

    let c = pdash().args(["--quiet", "--seed", "8"]).output().expect("run");
    assert_ne!(a.stdout, c.stdout);
}

#[test]
fn pie_mode_switches_on_pathogen_count() {
    let f = snapshot(
        r#"[
            {"Year": 2020, "Pathogen": "A", "Positive": 10, "Negative": 5},
            {"Year": 2021, "Pathogen": "A", "Positive": 3, "Negative": 7}
        ]"#,
    );
    pdash()
        .args(["--quiet", "--chart", "pie", "--input"])
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"outcome\""));

    let f = snapshot(
        r#"[
            {"Year": 2020, "Pathogen": "A", "Positive": 10, "Negative": 5},
            {"Year": 2020, "Pathogen": "B", "Positive": 3, "Negative": 7}
        ]"#,
    );
    pdash()
        .args(["--quiet", "--chart", "pie", "--input"])
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"per-pathogen\""));
}

#[test]
fn malformed_snapshot_is_a_validation_error() {
    // A broken explicit snapshot fails the run instead of being quietly
    // replaced by synthetic data.
    let f = snapshot(r#"[{"Year": "twenty-twenty"#);
    pdash()
        .args(["--quiet", "--input"])
        .arg(f.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("validation"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_snapshot_is_an_io_error() {
    pdash()
        .args(["--quiet", "--input", "/definitely/not/here.json"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn malformed_year_range_is_a_usage_error() {
    pdash()
        .args(["--quiet", "--years", "2020"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("MIN:MAX"));
}

#[test]
fn out_and_export_csv_write_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let spec_path = dir.path().join("spec.json");
    let csv_path = dir.path().join("grid.csv");

    pdash()
        .args(["--quiet", "--chart", "heatmap", "--pathogens", "SARS-CoV2"])
        .arg("--out")
        .arg(&spec_path)
        .arg("--export-csv")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let spec = std::fs::read_to_string(&spec_path).expect("spec file");
    assert!(spec.contains("\"kind\": \"heatmap\""));

    let csv = std::fs::read_to_string(&csv_path).expect("csv file");
    assert!(csv.starts_with("Year,Pathogen,Positive,Negative,Unknown"));
    assert!(csv.contains("SARS-CoV2"));
}

#[test]
fn year_filter_restricts_the_chart() {
    let f = snapshot(
        r#"[
            {"Year": 2019, "Pathogen": "A", "Positive": 1, "Negative": 1},
            {"Year": 2020, "Pathogen": "A", "Positive": 2, "Negative": 2},
            {"Year": 2021, "Pathogen": "A", "Positive": 3, "Negative": 3}
        ]"#,
    );
    pdash()
        .args(["--quiet", "--chart", "time-series", "--years", "2020:2021", "--input"])
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2019").not());
}
