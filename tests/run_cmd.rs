use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::time::Duration;
use std::path::Path;
use std::sync::OnceLock;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    cmd.timeout(Duration::from_secs(10))
        .env_remove("BF_LOOP_THRESHOLD")
        .env_remove("BF_OPTIMIZE")
        .env("XDG_CONFIG_HOME", config_home());
    cmd
}

/// Empty config home, so a `bf.toml` on the host cannot change results.
fn config_home() -> &'static Path {
    static DIR: OnceLock<tempfile::TempDir> = OnceLock::new();
    DIR.get_or_init(|| tempfile::tempdir().expect("tempdir")).path()
}

fn read_to_tempfile(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn copy_loop_emits_sum() {
    cargo_bin()
        .args(["run", "++>+++++[<+>-]<."])
        .assert()
        .success()
        .stdout("\u{7}\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn comments_are_ignored() {
    let program = "Print A: ++++++++[>++++++++<-]>+. done";
    cargo_bin()
        .args(["run", program])
        .assert()
        .success()
        .stdout("A\n");
}

#[test]
fn file_source_runs() {
    let tf = read_to_tempfile("++++++++[>++++++++<-]>+.\n+.\n");
    cargo_bin()
        .arg("run").arg("--file").arg(tf.path())
        .assert()
        .success()
        .stdout("AB\n");
}

#[test]
fn file_with_invalid_utf8_comments_still_runs() {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    tf.write_all(b"caf\xe9 ++++++++[>++++++++<-]>+. \xff\n").unwrap();
    cargo_bin()
        .arg("run").arg("--file").arg(tf.path())
        .assert()
        .success()
        .stdout("A\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn reads_from_stdin_and_echoes_byte() {
    cargo_bin()
        .args(["run", ",."])
        .write_stdin("Z")
        .assert()
        .success()
        .stdout("Z\n");
}

#[test]
fn eof_on_input_zeroes_the_cell() {
    cargo_bin()
        .args(["run", "+,."])
        .write_stdin("")
        .assert()
        .success()
        .stdout("\u{0}\n");
}

#[test]
fn pointer_wraps_around_the_tape() {
    // Moving left from cell 0 reaches the last cell; moving right from it returns to 0.
    let program = format!("<{}>.<.", "+".repeat(65));
    cargo_bin()
        .arg("run").arg(program)
        .assert()
        .success()
        .stdout("\u{0}A\n");
}

#[test]
fn unmatched_open_is_rejected_before_running() {
    cargo_bin()
        .args(["run", "+.[+"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Parse error: unmatched bracket '['"));
}

#[test]
fn unmatched_close_is_rejected_before_running() {
    cargo_bin()
        .args(["run", "+.]"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unmatched bracket ']'").and(predicate::str::contains("^")));
}

#[test]
fn missing_code_is_a_usage_error() {
    cargo_bin()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn code_and_file_together_is_a_usage_error() {
    let tf = read_to_tempfile("+.");
    cargo_bin()
        .arg("run").arg("--file").arg(tf.path()).arg("+.")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot use positional code together with --file"));
}

#[test]
fn missing_file_fails() {
    cargo_bin()
        .args(["run", "--file", "/definitely/not/here.bf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read code file"));
}

#[test]
fn debug_flag_prints_table_instead_of_output() {
    cargo_bin()
        .args(["run", "--debug", ">+."])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("STEP | IP")
                .and(predicate::str::contains("Moved pointer head to index 1"))
                .and(predicate::str::contains("suppressed in debug")),
        );
}
