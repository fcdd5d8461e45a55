use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn liftlog(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("liftlog").expect("binary built");
    cmd.arg("--data-dir").arg(data_dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn init_then_list_reports_empty_catalog() {
    let temp_dir = tempdir().expect("temporary directory");

    liftlog(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete."));
    let header = fs::read_to_string(temp_dir.path().join("movements.csv")).expect("catalog read");
    assert!(header.starts_with("id,name"));
    assert!(temp_dir.path().join("workouts.csv").exists());

    liftlog(temp_dir.path())
        .arg("list-movements")
        .assert()
        .success()
        .stdout(predicate::str::contains("No movements found"));
}

#[test]
fn add_set_with_underscore_flags_and_unknown_type_warns() {
    let temp_dir = tempdir().expect("temporary directory");

    liftlog(temp_dir.path())
        .args([
            "add-set",
            "--workout_id",
            "w1",
            "--movement_name",
            "Bench Press",
            "--set_number",
            "1",
            "--set_type",
            "mystery",
            "--reps",
            "5",
            "--load",
            "80",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added movement bench_press - Bench Press"))
        .stdout(predicate::str::contains("Warning: set_type 'mystery' not in known choices"))
        .stdout(predicate::str::contains("Appended set: w1 Bench Press set 1"));

    liftlog(temp_dir.path())
        .args(["find-movement", "--name", "bench", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"bench_press\""));
}

#[test]
fn duplicate_movement_id_exits_with_error() {
    let temp_dir = tempdir().expect("temporary directory");
    let add = |dir: &std::path::Path| {
        let mut cmd = liftlog(dir);
        cmd.args(["add-movement", "--id", "ohp", "--name", "Overhead Press"]);
        cmd
    };

    add(temp_dir.path()).assert().success();
    add(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("movement id already exists: ohp"));
}

#[test]
fn export_summary_writes_requested_file() {
    let temp_dir = tempdir().expect("temporary directory");
    let out = temp_dir.path().join("summary.csv");

    liftlog(temp_dir.path())
        .args([
            "add-set",
            "--workout-id",
            "w9",
            "--movement-name",
            "Row",
            "--set-number",
            "1",
            "--reps",
            "8",
        ])
        .assert()
        .success();
    liftlog(temp_dir.path())
        .args(["export-summary", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 workouts"));

    let text = fs::read_to_string(&out).expect("summary read");
    assert!(text.contains("w9"));
    assert!(text.contains("Row:1x8@"));
}

#[test]
fn start_session_logs_sets_from_stdin() {
    let temp_dir = tempdir().expect("temporary directory");

    liftlog(temp_dir.path())
        .args(["start-session", "--workout-id", "s1", "--date", "2025-02-01"])
        .write_stdin("Snatch\n3\n60\nkg\n\nSnatch\n2\n\n\n\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Appended set: s1 Snatch set 2"));

    let log = fs::read_to_string(temp_dir.path().join("workouts.csv")).expect("log read");
    assert_eq!(log.lines().count(), 3);
}
