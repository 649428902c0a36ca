use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("plantilla").unwrap()
}

#[test]
fn help_flag_prints_usage_with_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("skeleton"))
        .stdout(predicate::str::contains("lines"))
        .stdout(predicate::str::contains("fields"));
}

#[test]
fn skeleton_subcommand_help() {
    cmd()
        .args(["skeleton", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn lines_subcommand_help() {
    cmd()
        .args(["lines", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("--page"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn fields_subcommand_help() {
    cmd()
        .args(["fields", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn no_args_shows_help() {
    // Running with no subcommand should show usage / error
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn skeleton_requires_file_argument() {
    cmd()
        .arg("skeleton")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FILE"));
}

#[cfg(feature = "ollama")]
#[test]
fn generate_subcommand_help() {
    cmd()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--image"))
        .stdout(predicate::str::contains("--model"))
        .stdout(predicate::str::contains("--ollama-url"));
}
