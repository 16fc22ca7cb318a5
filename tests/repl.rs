fn make_cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("bfvm").expect("bfvm binary")
}

#[test]
fn repl_on_piped_stdin_is_silent_without_input() {
    let mut cmd = make_cmd();
    // With piped (non-TTY) stdin the REPL auto-selects bare mode and prints
    // no prompt or banner.
    cmd.arg("repl")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicates::str::is_empty())
        .stderr(predicates::str::is_empty());
}

#[test]
fn repl_valid_program_then_eof_outputs_and_exits() {
    let mut cmd = make_cmd();
    // 65 '+' then '.', printing 'A'.
    let program = format!("{}.", "+".repeat(65));

    cmd.arg("repl")
        .env("BFVM_REPL_ONCE", "1")
        .write_stdin(program)
        .assert()
        .success()
        .stdout(predicates::str::contains("A\n"))
        .stderr(predicates::str::is_empty());
}

#[test]
fn repl_parse_error_reports_and_exits_cleanly() {
    let mut cmd = make_cmd();

    cmd.arg("repl")
        .env("BFVM_REPL_ONCE", "1")
        .write_stdin("]")
        .assert()
        .success()
        .stderr(predicates::str::contains("parse error: unmatched ']'"))
        // A trailing newline still lands on stdout after the failed run.
        .stdout(predicates::str::contains("\n"));
}

#[test]
fn repl_comment_only_submission_produces_no_output() {
    let mut cmd = make_cmd();

    cmd.arg("repl")
        .write_stdin("just some words\n")
        .assert()
        .success()
        .stdout(predicates::str::is_empty())
        .stderr(predicates::str::is_empty());
}

#[test]
fn repl_runtime_error_reports_on_stderr() {
    let mut cmd = make_cmd();

    cmd.arg("repl")
        .env("BFVM_REPL_ONCE", "1")
        .write_stdin("<")
        .assert()
        .success()
        .stderr(predicates::str::contains("tape underflow"));
}

#[test]
fn repl_state_is_fresh_across_runs() {
    let program = format!("{}.", "+".repeat(65));

    let assert1 = make_cmd()
        .arg("repl")
        .env("BFVM_REPL_ONCE", "1")
        .write_stdin(program.clone())
        .assert()
        .success();
    let out1 = String::from_utf8(assert1.get_output().stdout.clone()).expect("utf8");

    let assert2 = make_cmd()
        .arg("repl")
        .env("BFVM_REPL_ONCE", "1")
        .write_stdin(program)
        .assert()
        .success();
    let out2 = String::from_utf8(assert2.get_output().stdout.clone()).expect("utf8");

    assert!(out1.contains("A\n"), "first run should print A, got: {out1:?}");
    assert_eq!(out1, out2, "stdout should be identical across fresh runs");
}
