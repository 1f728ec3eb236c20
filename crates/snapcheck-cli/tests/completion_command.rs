use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn snapcheck_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("snapcheck")
}

#[test]
fn test_completion_bash_generates_script() {
    let mut cmd = Command::new(snapcheck_bin());
    cmd.arg("completion").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_snapcheck()"))
        .stdout(predicate::str::contains("complete -F _snapcheck"));
}

#[test]
fn test_completion_zsh_generates_script() {
    let mut cmd = Command::new(snapcheck_bin());
    cmd.arg("completion").arg("zsh");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#compdef snapcheck"));
}

#[test]
fn test_completion_rejects_unknown_shell() {
    let mut cmd = Command::new(snapcheck_bin());
    cmd.arg("completion").arg("tcsh");

    cmd.assert().failure();
}
