//! Concurrency tests for the forja binary.
//!
//! These tests verify that repeated invocations can safely:
//! - Append to WAL files (file locking)
//! - Read and write state
//! - Perform rollup operations without corruption

use assert_cmd::Command;
use chrono::Datelike;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("forja"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn today() -> &'static str {
    match chrono::Local::now().weekday() {
        chrono::Weekday::Mon => "lunes",
        chrono::Weekday::Tue => "martes",
        chrono::Weekday::Wed => "miercoles",
        chrono::Weekday::Thu => "jueves",
        chrono::Weekday::Fri => "viernes",
        chrono::Weekday::Sat => "sabado",
        chrono::Weekday::Sun => "domingo",
    }
}

#[test]
fn test_repeated_weight_logging() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Run appends with slight delays (more realistic than thundering herd)
    for i in 0..5 {
        thread::sleep(Duration::from_millis(i * 5));
        cli()
            .arg("weight")
            .arg(format!("{}", 80.0 + i as f64 * 0.1))
            .arg("--data-dir")
            .arg(&data_dir)
            .assert()
            .success();
    }

    // Verify all entries were logged
    let wal_path = data_dir.join("wal/body_weight.wal");
    let wal_content = std::fs::read_to_string(&wal_path).expect("Failed to read WAL");

    // Count lines (each line is an entry)
    let entry_count = wal_content.lines().count();
    assert_eq!(entry_count, 5, "Expected 5 entries, got {}", entry_count);
}

#[test]
fn test_workout_logging_interleaved_with_reads() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("plan")
        .arg("init")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();
    cli()
        .arg("plan")
        .arg("set-day")
        .arg("--day")
        .arg(today())
        .arg("--group")
        .arg("espalda")
        .arg("--exercise")
        .arg("Remo con barra")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    // Write sessions with delays, reading status in between
    for i in 0..3 {
        thread::sleep(Duration::from_millis(i * 10));
        cli()
            .arg("log")
            .arg("--exercise")
            .arg("Remo con barra")
            .arg("--set")
            .arg("60x10")
            .arg("--data-dir")
            .arg(&data_dir)
            .assert()
            .success();

        cli()
            .arg("status")
            .arg("--data-dir")
            .arg(&data_dir)
            .assert()
            .success();
    }

    let wal_path = data_dir.join("wal/workout_logs.wal");
    let wal_content = std::fs::read_to_string(&wal_path).expect("Failed to read WAL");
    assert_eq!(wal_content.lines().count(), 3);
}

#[test]
fn test_rollup_between_writes() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("plan")
        .arg("init")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();
    cli()
        .arg("plan")
        .arg("set-day")
        .arg("--day")
        .arg(today())
        .arg("--group")
        .arg("piernas")
        .arg("--exercise")
        .arg("Sentadilla")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    for _ in 0..2 {
        cli()
            .arg("log")
            .arg("--exercise")
            .arg("Sentadilla")
            .arg("--set")
            .arg("100x5")
            .arg("--data-dir")
            .arg(&data_dir)
            .assert()
            .success();
    }

    cli()
        .arg("rollup")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    // Writes after rollup land in a fresh WAL
    cli()
        .arg("log")
        .arg("--exercise")
        .arg("Sentadilla")
        .arg("--set")
        .arg("100x5")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    let wal_path = data_dir.join("wal/workout_logs.wal");
    let wal_content = std::fs::read_to_string(&wal_path).expect("Failed to read WAL");
    assert_eq!(wal_content.lines().count(), 1);

    assert!(data_dir.join("workouts.csv").exists());
}
