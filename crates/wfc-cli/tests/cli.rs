//! Exit status and diagnostics of the `wfc` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn wfc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wfc"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn extract_fails_on_missing_data_dir() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("waves");
    let out = dir.path().join("out");

    let output = wfc(&[
        "--color",
        "never",
        "extract",
        "--data-dir",
        path_arg(&data),
        "--output-dir",
        path_arg(&out),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: data directory not found"), "{stderr}");
    assert!(!out.exists());
}

#[test]
fn extract_fails_on_empty_corpus() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("waves");
    fs::create_dir_all(data.join("p100")).unwrap();
    let out = dir.path().join("out");

    let output = wfc(&[
        "extract",
        "--data-dir",
        path_arg(&data),
        "--output-dir",
        path_arg(&out),
        "--skip-numerics",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: no records found"), "{stderr}");
    // Reported once, not again through the log output.
    assert_eq!(stderr.matches("no records found").count(), 1, "{stderr}");
    assert!(!out.exists());
}

#[test]
fn update_records_fails_on_empty_corpus() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("waves");
    fs::create_dir_all(&data).unwrap();
    let out = dir.path().join("out").join("waveform_records.csv");

    let output = wfc(&[
        "update-records",
        "--data-dir",
        path_arg(&data),
        "--output-file",
        path_arg(&out),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
}

#[test]
fn extract_logs_run_progress_at_info() {
    let dir = TempDir::new().unwrap();
    let record_dir = dir.path().join("waves/p100/p10000032/80000001");
    fs::create_dir_all(&record_dir).unwrap();
    fs::write(record_dir.join("80000001.hea"), "80000001 0\n").unwrap();
    let data = dir.path().join("waves");
    let out = dir.path().join("out");

    let output = wfc(&[
        "--log-level",
        "info",
        "--color",
        "never",
        "extract",
        "--data-dir",
        path_arg(&data),
        "--output-dir",
        path_arg(&out),
        "--skip-numerics",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("scanning for records"), "{stderr}");
    assert!(stderr.contains("numerics processing disabled"), "{stderr}");
    assert!(stderr.contains("extraction complete"), "{stderr}");
    assert!(out.join("waveform_records.csv").is_file());
}
