use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command {
    Command::cargo_bin("bfvm").unwrap()
}

fn small_valid_program() -> &'static str {
    "+++."
}

fn infinite_program() -> &'static str {
    "+[]"
}

#[test]
fn stdout_carries_only_program_output() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("run")
        .arg(small_valid_program())
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not())
        .stderr(predicate::str::is_empty());
}

#[test]
fn timeout_env_aborts_runaway_programs() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .env("BFVM_TIMEOUT_MS", "100")
        .arg("run")
        .arg(infinite_program())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Execution aborted"))
        .stdout(predicate::str::contains("Execution aborted").not());
}

#[test]
fn timeout_flag_overrides_env() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .env("BFVM_TIMEOUT_MS", "60000")
        .arg("run")
        .arg("--timeout")
        .arg("100")
        .arg(infinite_program())
        .assert()
        .failure()
        .stderr(predicate::str::contains("100 ms"));
}

#[test]
fn fast_programs_finish_within_a_generous_timeout() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("run")
        .arg("--timeout")
        .arg("5000")
        .arg(small_valid_program())
        .assert()
        .success()
        .stdout("\u{3}");
}
