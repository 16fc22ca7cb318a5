use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cargo_bin() -> Command {
    Command::cargo_bin("bfvm").unwrap()
}

fn small_valid_program() -> &'static str {
    "+++."
}

fn source_to_tempfile(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn run_positional_code_succeeds() {
    // Piped stdout stays byte-exact: the program's single byte, no newline.
    cargo_bin()
        .arg("run")
        .arg(small_valid_program())
        .assert()
        .success()
        .stdout("\u{3}")
        .stderr(predicate::str::is_empty());
}

#[test]
fn run_concatenates_positional_parts() {
    cargo_bin()
        .arg("run")
        .arg("++")
        .arg("+.")
        .assert()
        .success()
        .stdout("\u{3}");
}

#[test]
fn run_file_succeeds() {
    let tf = source_to_tempfile(small_valid_program());
    cargo_bin()
        .arg("run")
        .arg("--file")
        .arg(tf.path())
        .assert()
        .success()
        .stdout("\u{3}")
        .stderr(predicate::str::is_empty());
}

#[test]
fn run_missing_file_fails_with_diagnostic() {
    cargo_bin()
        .arg("run")
        .arg("--file")
        .arg("no-such-file.b")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read source file"));
}

#[test]
fn run_rejects_code_and_file_together() {
    let tf = source_to_tempfile(small_valid_program());
    cargo_bin()
        .arg("run")
        .arg("--file")
        .arg(tf.path())
        .arg(small_valid_program())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cannot use positional code together with --file",
        ));
}

#[test]
fn run_without_code_shows_usage_and_exits_2() {
    cargo_bin()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn transfer_loop_emits_byte_seven() {
    cargo_bin()
        .arg("run")
        .arg("++>+++++[<+>-]<.")
        .assert()
        .success()
        .stdout("\u{7}");
}

#[test]
fn comment_characters_are_ignored() {
    cargo_bin()
        .arg("run")
        .arg("this text wraps +++ the payload .")
        .assert()
        .success()
        .stdout("\u{3}");
}

#[test]
fn no_subcommand_shows_usage_and_exits_2() {
    cargo_bin()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}
