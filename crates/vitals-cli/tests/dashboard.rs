use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::tempdir;

use vitals_lib::dashboard::{DashboardSummary, HeartRateBand, TemperatureBand};
use vitals_lib::signal::PeakSet;

fn vitals() -> Command {
    Command::cargo_bin("vitals").expect("vitals binary")
}

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crates dir")
        .parent()
        .expect("workspace root")
        .to_path_buf()
}

fn sample_path(relative: &str) -> String {
    workspace_root()
        .join(relative)
        .to_string_lossy()
        .to_string()
}

#[test]
fn simulate_then_dashboard_recovers_the_configured_rates() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("synthetic.csv");

    vitals()
        .args([
            "simulate",
            "--out",
            csv.to_str().unwrap(),
            "--duration-s",
            "30",
            "--fs",
            "256",
            "--bpm",
            "72",
            "--breaths-per-min",
            "15",
            "--temperature",
            "37.5",
            "--seed",
            "7",
        ])
        .assert()
        .success();

    let output = vitals()
        .args(["dashboard", "--input", csv.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let summary: DashboardSummary = serde_json::from_slice(&output).expect("summary json");

    let hr = summary.heart_rate.expect("heart rate");
    assert!(
        (hr.rate.mean_bpm - 72.0).abs() < 5.0,
        "mean bpm {}",
        hr.rate.mean_bpm
    );
    assert_eq!(hr.band, HeartRateBand::Normal);

    let hrv = summary.hrv.expect("hrv");
    assert!(hrv.hrv.score.is_finite());
    assert!((0.0..=100.0).contains(&hrv.hrv.gauge));

    let resp = summary.respiration.expect("respiration");
    assert!(
        (resp.breaths_per_minute - 15.0).abs() <= 2.0,
        "breaths/min {}",
        resp.breaths_per_minute
    );

    let temp = summary.temperature.expect("temperature");
    assert_eq!(temp.band, TemperatureBand::MildlyElevated);

    assert!(!summary.motion.is_empty());
}

#[test]
fn dashboard_survives_a_single_sample_recording() {
    let output = vitals()
        .args([
            "dashboard",
            "--input",
            &sample_path("test_data/single_sample.csv"),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let summary: DashboardSummary = serde_json::from_slice(&output).expect("summary json");
    assert!(summary.heart_rate.is_err());
    assert!(summary.hrv.is_err());
    assert!(summary.respiration.is_err());
    assert!(summary.temperature.is_ok());
}

#[test]
fn missing_input_fails_the_session() {
    vitals()
        .args(["dashboard", "--input", "no_such_recording.csv"])
        .assert()
        .failure();
}

#[test]
fn find_rpeaks_prints_indices() {
    let output = vitals()
        .args([
            "find-rpeaks",
            "--input",
            &sample_path("test_data/sample_recording.csv"),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let peaks: PeakSet = serde_json::from_slice(&output).expect("peaks json");
    assert_eq!(peaks.indices, vec![1, 5]);
}
