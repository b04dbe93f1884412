use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use std::sync::OnceLock;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    cmd.env_remove("BF_OPTIMIZE").env("XDG_CONFIG_HOME", config_home());
    cmd
}

/// Empty config home, so a `bf.toml` on the host cannot change results.
fn config_home() -> &'static Path {
    static DIR: OnceLock<tempfile::TempDir> = OnceLock::new();
    DIR.get_or_init(|| tempfile::tempdir().expect("tempdir")).path()
}

#[test]
fn empty_constructs_vanish() {
    cargo_bin()
        .args(["optimize", "[[]]><"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn runs_collapse_and_comments_drop() {
    cargo_bin()
        .args(["optimize", "+++-- then > and [ - ] <>."])
        .assert()
        .success()
        .stdout("+>[-].\n");
}

#[test]
fn pairs_exposed_by_collapsing_are_printed() {
    cargo_bin()
        .args(["optimize", "[+-]<+->"])
        .assert()
        .success()
        .stdout("[]<>\n");
}

#[test]
fn no_optimize_only_filters() {
    cargo_bin()
        .args(["optimize", "--no-optimize", "[a]sdfg[+sdg+gdf+a]"])
        .assert()
        .success()
        .stdout("[][+++]\n");

    cargo_bin()
        .env("BF_OPTIMIZE", "0")
        .args(["optimize", "+-<>"])
        .assert()
        .success()
        .stdout("+-<>\n");
}

#[test]
fn unbalanced_source_is_reported() {
    cargo_bin()
        .args(["optimize", "]["])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unmatched bracket ']' at instruction 0"));
}
