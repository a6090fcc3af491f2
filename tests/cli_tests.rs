//! Binary-level tests for the `pomodoro` command.
//!
//! Input is piped through stdin, so every `run` session ends at EOF or `q`.

use assert_cmd::Command;
use predicates::prelude::*;

fn pomodoro() -> Command {
    Command::cargo_bin("pomodoro").unwrap()
}

#[test]
fn help_lists_subcommands() {
    pomodoro()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn no_args_prints_help() {
    pomodoro()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn completions_for_bash() {
    pomodoro()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomodoro"));
}

#[test]
fn run_json_reports_adjusted_duration() {
    pomodoro()
        .args(["run", "--no-sound", "--json"])
        .write_stdin("+\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"work_seconds\":1500"))
        .stdout(predicate::str::contains("\"work_seconds\":1560"))
        .stdout(predicate::str::contains("\"status\":\"idle\""));
}

#[test]
fn run_json_tags_every_event() {
    pomodoro()
        .args(["run", "--no-sound", "--json", "--autostart"])
        .write_stdin("r\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"event\":\"state_changed\""))
        .stdout(predicate::str::contains("\"status\":\"running\""));
}

#[test]
fn run_plain_output_shows_session_label() {
    pomodoro()
        .args(["run", "--no-sound", "--work", "1"])
        .write_stdin("i\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Work] 01:00 ready"))
        .stdout(predicate::str::contains("Pomodoro Technique"));
}

#[test]
fn run_reports_unknown_input_and_continues() {
    pomodoro()
        .args(["run", "--no-sound", "--json"])
        .write_stdin("launch\n-\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown command 'launch'"))
        .stdout(predicate::str::contains("\"work_seconds\":1440"));
}

#[test]
fn run_rejects_missing_sound_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("level-up.mp3");

    pomodoro()
        .args(["run", "--sound"])
        .arg(&missing)
        .write_stdin("q\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot use sound file"));
}

#[test]
fn run_rejects_out_of_range_work() {
    pomodoro()
        .args(["run", "--work", "0"])
        .assert()
        .failure();
}
