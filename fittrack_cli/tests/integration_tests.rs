//! Integration tests for the fittrack binary.
//!
//! These tests verify end-to-end behavior including:
//! - Library and plan listing
//! - Running a workout to completion
//! - Cancelling a workout
//! - Config overrides

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test config directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fittrack"))
}

/// CLI command that cannot see the user's real config directory
fn isolated_cli(dir: &TempDir) -> Command {
    let mut cmd = cli();
    cmd.env("XDG_CONFIG_HOME", dir.path()).env("HOME", dir.path());
    cmd
}

/// Write a config file and return its path
fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("Failed to write config");
    path
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();

    isolated_cli(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Workout tracker with guided sessions and rest timers",
        ));
}

#[test]
fn test_plans_lists_all_sessions() {
    let temp_dir = setup_test_dir();

    isolated_cli(&temp_dir)
        .arg("plans")
        .assert()
        .success()
        .stdout(predicate::str::contains("full-body-strength"))
        .stdout(predicate::str::contains("HIIT Cardio Blast"))
        .stdout(predicate::str::contains("flexibility-flow"));
}

#[test]
fn test_exercises_filtered_by_category() {
    let temp_dir = setup_test_dir();

    isolated_cli(&temp_dir)
        .args(["exercises", "--category", "cardio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Burpees"))
        .stdout(predicate::str::contains("Running"))
        .stdout(predicate::str::contains("Deadlift").not());
}

#[test]
fn test_unknown_category_fails() {
    let temp_dir = setup_test_dir();

    isolated_cli(&temp_dir)
        .args(["exercises", "--category", "juggling"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category: juggling"));
}

#[test]
fn test_show_plan() {
    let temp_dir = setup_test_dir();

    isolated_cli(&temp_dir)
        .args(["show", "back-strength"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Back Strength Builder"))
        .stdout(predicate::str::contains("Deadlift - 4 sets x 5 reps @ 225 lbs, rest 180s"));
}

#[test]
fn test_start_unknown_plan_fails() {
    let temp_dir = setup_test_dir();
    let config = write_config(&temp_dir, "");

    cli()
        .args(["start", "no-such-plan", "--auto-complete", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown workout session: no-such-plan"));
}

#[test]
fn test_auto_complete_records_workout() {
    let temp_dir = setup_test_dir();
    let config = write_config(&temp_dir, "");

    cli()
        .args(["start", "hiit-cardio", "--auto-complete", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Started: HIIT Cardio Blast"))
        .stdout(predicate::str::contains("Workout completed! Great job!"))
        .stdout(predicate::str::contains("Sets:      12"))
        .stdout(predicate::str::contains("Workouts:  25"));
}

#[test]
fn test_auto_complete_json_output() {
    let temp_dir = setup_test_dir();
    let config = write_config(
        &temp_dir,
        r#"
[stats]
weekly_goal = 3
use_sample_data = false
"#,
    );

    let output = cli()
        .args(["start", "beginner-fitness", "--auto-complete", "--json", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to run fittrack");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");

    assert_eq!(value["log"]["session_id"], "beginner-fitness");
    assert_eq!(value["log"]["total_sets"], 15);
    assert_eq!(value["log"]["exercises_completed"], 5);
    // dumbbell row 3 x 12 x 20 + shoulder press 3 x 10 x 15
    assert_eq!(value["log"]["total_volume"].as_f64(), Some(1170.0));
    assert_eq!(value["stats"]["total_workouts"], 1);
    assert_eq!(value["stats"]["current_streak"], 1);
    assert_eq!(value["stats"]["weekly_completed"], 1);
    assert_eq!(value["stats"]["weekly_goal"], 3);
}

#[test]
fn test_interactive_cancel_records_nothing() {
    let temp_dir = setup_test_dir();
    let config = write_config(&temp_dir, "");

    cli()
        .args(["start", "upper-body-power", "--config"])
        .arg(&config)
        .write_stdin("\n\n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Set 1 of Bench Press completed!"))
        .stdout(predicate::str::contains("Workout cancelled"))
        .stdout(predicate::str::contains("WORKOUT COMPLETE").not());
}

#[test]
fn test_interactive_edit_and_finish_early() {
    let temp_dir = setup_test_dir();
    let config = write_config(
        &temp_dir,
        "[stats]\nuse_sample_data = false\n",
    );

    // Squat set 1 at 10 reps x 200 lbs, then finish with one set done
    cli()
        .args(["start", "lower-body-focus", "--config"])
        .arg(&config)
        .write_stdin("w 200\nr 9\n+\n\nf\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sets:      1"))
        .stdout(predicate::str::contains("Volume:    2000 lbs"))
        .stdout(predicate::str::contains("Workouts:  1"));
}

#[test]
fn test_interactive_finish_after_last_set() {
    let temp_dir = setup_test_dir();
    let config = write_config(&temp_dir, "[stats]\nuse_sample_data = false\n");

    // Six sets, then confirm the finish prompt
    cli()
        .args(["start", "flexibility-flow", "--config"])
        .arg(&config)
        .write_stdin("\n\n\n\n\n\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("All sets complete!"))
        .stdout(predicate::str::contains("Exercises: 3"))
        .stdout(predicate::str::contains("Sets:      6"));
}

#[test]
fn test_closed_input_cancels() {
    let temp_dir = setup_test_dir();
    let config = write_config(&temp_dir, "");

    cli()
        .args(["start", "hiit-cardio", "--config"])
        .arg(&config)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "The rest countdown refreshes each time a command is entered.",
        ))
        .stdout(predicate::str::contains("Workout cancelled"));
}

#[test]
fn test_stats_json() {
    let temp_dir = setup_test_dir();
    let config = write_config(&temp_dir, "");

    let output = cli()
        .args(["stats", "--json", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to run fittrack");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["stats"]["total_workouts"], 24);
    assert_eq!(value["history"].as_array().map(|h| h.len()), Some(5));
    assert_eq!(value["history"][0]["session_name"], "Full Body Strength");
}

#[test]
fn test_invalid_config_fails() {
    let temp_dir = setup_test_dir();
    let config = write_config(&temp_dir, "[stats]\nweekly_goal = 0\n");

    cli()
        .args(["plans", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("weekly_goal"));
}

#[test]
fn test_missing_config_uses_defaults() {
    let temp_dir = setup_test_dir();

    let output = isolated_cli(&temp_dir)
        .args(["stats", "--json"])
        .output()
        .expect("Failed to run fittrack");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["stats"]["weekly_goal"], 4);
}

#[test]
fn test_navigation_reports_boundaries() {
    let temp_dir = setup_test_dir();
    let config = write_config(&temp_dir, "");

    // flexibility-flow has six sets; step past the last one
    cli()
        .args(["start", "flexibility-flow", "--config"])
        .arg(&config)
        .write_stdin("p\nn\nn\nn\nn\nn\nn\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("At the first set."))
        .stdout(predicate::str::contains("At the last set."))
        .stdout(predicate::str::contains("Workout cancelled"));
}

#[test]
fn test_stats_shows_last_workout() {
    let temp_dir = setup_test_dir();
    let config = write_config(&temp_dir, "");

    cli()
        .args(["stats", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Last:      Full Body Strength on"));
}
