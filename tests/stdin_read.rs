// Exercises the ',' (input) instruction by providing bytes on stdin to the
// program ",." (read one byte, then echo it).
#[test]
fn reads_from_stdin_and_echoes_byte() {
    let mut cmd = assert_cmd::Command::cargo_bin("bfvm").expect("failed to locate bfvm binary");

    cmd.arg("run")
        .arg(",.")
        .write_stdin("Z")
        .assert()
        .success()
        .stdout("Z");
}

#[test]
fn end_of_input_writes_zero() {
    let mut cmd = assert_cmd::Command::cargo_bin("bfvm").expect("failed to locate bfvm binary");

    cmd.arg("run")
        .arg(",.")
        .write_stdin("")
        .assert()
        .success()
        .stdout("\u{0}");
}

#[test]
fn cat_program_copies_input_until_end_of_stream() {
    let mut cmd = assert_cmd::Command::cargo_bin("bfvm").expect("failed to locate bfvm binary");

    cmd.arg("run")
        .arg(",[.,]")
        .write_stdin("abc")
        .assert()
        .success()
        .stdout("abc");
}
