//! CLI contract tests.

use assert_cmd::Command;

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}

#[test]
fn help_lists_the_subcommands() {
    let mut cmd = Command::cargo_bin("ariane").expect("binary builds");
    let output = stdout_of(cmd.arg("--help").assert().success());
    assert!(output.contains("chat"));
    assert!(output.contains("ask"));
}

#[test]
fn ask_answers_a_greeting_against_the_demo_roster() {
    let mut cmd = Command::cargo_bin("ariane").expect("binary builds");
    let output = stdout_of(
        cmd.args(["ask", "--user", "EMP001", "bonjour"])
            .assert()
            .success(),
    );
    assert!(output.contains("Bonjour"));
}

#[test]
fn ask_with_unknown_user_fails() {
    let mut cmd = Command::cargo_bin("ariane").expect("binary builds");
    cmd.args(["ask", "--user", "EMP999", "bonjour"])
        .assert()
        .failure();
}
