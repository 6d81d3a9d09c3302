//! Integration tests for the `timetable` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the check,
//! validate, and free-slots subcommands through the actual binary, including
//! stdin/stdout piping, file I/O, exit codes, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the week.json fixture (teacher and room clash at Monday 09:00).
fn week_json() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/week.json")
}

/// Helper: path to the clean.json fixture (no conflicts, no issues).
fn clean_json() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/clean.json")
}

/// Helper: path to the invalid.json fixture (broken invariants).
fn invalid_json() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/invalid.json")
}

/// Helper: path to the grid.json config fixture.
fn grid_json() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/grid.json")
}

fn timetable() -> Command {
    Command::cargo_bin("timetable").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_outputs_conflicts_as_json() {
    let output = timetable()
        .args(["check", "-i", week_json()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let conflicts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let conflicts = conflicts.as_array().expect("top-level array");
    assert_eq!(conflicts.len(), 4);

    assert_eq!(conflicts[0]["itemId"], "a");
    assert_eq!(conflicts[0]["kind"], "Teacher");
    assert_eq!(
        conflicts[0]["message"],
        "Teacher Reed is double-booked with 'Physics' and 'Chemistry'."
    );
    assert_eq!(
        conflicts[0]["suggestions"][1],
        "Try moving one class to 10:00 on Monday."
    );

    assert_eq!(conflicts[2]["itemId"], "a");
    assert_eq!(conflicts[2]["kind"], "Room");
    assert_eq!(
        conflicts[2]["suggestions"][0],
        "Try moving to: Room 101 (Cap: 30)."
    );
}

#[test]
fn check_reads_stdin() {
    let input = std::fs::read_to_string(week_json()).unwrap();

    timetable()
        .arg("check")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Room Science Lab is double-booked"));
}

#[test]
fn check_text_format() {
    timetable()
        .args(["check", "-i", week_json(), "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[b] Teacher Reed is double-booked with 'Physics' and 'Chemistry'.",
        ))
        .stdout(predicate::str::contains("  - Check Reed's schedule for an open slot."));
}

#[test]
fn check_clean_schedule_prints_empty_array() {
    timetable()
        .args(["check", "-i", clean_json()])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]"));
}

#[test]
fn check_writes_output_file() {
    let output_path = std::env::temp_dir().join("timetable-test-check-output.json");
    let _ = std::fs::remove_file(&output_path);

    timetable()
        .args(["check", "-i", week_json(), "-o"])
        .arg(&output_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert!(content.contains("\"itemId\""));

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn fail_on_conflict_sets_exit_code() {
    timetable()
        .args(["check", "-i", week_json(), "--fail-on-conflict"])
        .assert()
        .code(2);

    timetable()
        .args(["check", "-i", clean_json(), "--fail-on-conflict"])
        .assert()
        .success();
}

#[test]
fn check_invalid_json_fails() {
    timetable()
        .arg("check")
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse timetable JSON"));
}

#[test]
fn check_missing_file_fails() {
    timetable()
        .args(["check", "-i", "/nonexistent/week.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn check_tolerates_items_with_missing_fields() {
    let input = r#"{"schedule":[
        {"id":"a","teacher":"Reed","studentGroup":"9A","roomId":"r1","day":"Monday","startTime":"09:00"},
        {"id":"b","subject":"Chemistry","teacher":"Reed","studentGroup":"10B","roomId":"r2",
         "day":"Monday","startTime":"09:00","endTime":"10:00"}
    ]}"#;

    timetable()
        .arg("check")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Teacher Reed is double-booked with '' and 'Chemistry'.",
        ));
}

#[test]
fn check_grid_days_limit_move_hint() {
    let input = r#"{"schedule":[
        {"id":"a","subject":"Physics","teacher":"Reed","studentGroup":"9A","roomId":"r1",
         "day":"Friday","startTime":"09:00","endTime":"10:00"},
        {"id":"b","subject":"Chemistry","teacher":"Reed","studentGroup":"10B","roomId":"r2",
         "day":"Friday","startTime":"09:00","endTime":"10:00"}
    ]}"#;

    timetable()
        .args(["check", "--format", "text"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Try moving one class to 10:00 on Friday."));

    timetable()
        .args(["check", "--format", "text", "--config", grid_json()])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Check Reed's schedule for an open slot."))
        .stdout(predicate::str::contains("Try moving one class").not());
}

#[test]
fn check_missing_config_reports_io_error() {
    timetable()
        .args(["check", "-i", week_json(), "--config", "/nonexistent/grid.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"))
        .stderr(predicate::str::contains("I/O error"));
}

// ─────────────────────────────────────────────────────────────────────────────
// validate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn validate_clean_prints_ok() {
    timetable()
        .args(["validate", "-i", clean_json()])
        .assert()
        .success()
        .stdout(predicate::str::diff("OK\n"));
}

#[test]
fn validate_reports_every_issue() {
    timetable()
        .args(["validate", "-i", invalid_json()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("'9:00' is not a zero-padded HH:MM time"))
        .stdout(predicate::str::contains("duplicate schedule item id 'a'"))
        .stdout(predicate::str::contains("end time 10:00 is not after start time 11:00"))
        .stdout(predicate::str::contains("room 'attic' is not a known room"));
}

// ─────────────────────────────────────────────────────────────────────────────
// free-slots
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn free_slots_default_grid() {
    timetable()
        .args(["free-slots", "-i", week_json(), "--teacher", "Reed", "--day", "monday"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "08:00\n10:00\n12:00\n13:00\n14:00\n15:00\n16:00\n17:00\n",
        ));
}

#[test]
fn free_slots_custom_grid() {
    timetable()
        .args([
            "free-slots",
            "-i",
            week_json(),
            "--teacher",
            "Reed",
            "--day",
            "Monday",
            "--config",
            grid_json(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("08:30\n10:30\n12:00\n"));
}

#[test]
fn free_slots_day_outside_grid_fails() {
    timetable()
        .args([
            "free-slots",
            "-i",
            week_json(),
            "--teacher",
            "Reed",
            "--day",
            "Friday",
            "--config",
            grid_json(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a school day"));
}

#[test]
fn free_slots_unknown_day_fails() {
    timetable()
        .args(["free-slots", "-i", week_json(), "--teacher", "Reed", "--day", "Sunday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --day"));
}
