//! Binary-level tests: exit codes and the orchestrator-facing surface.

use assert_cmd::Command;
use predicates::prelude::*;

fn stratus() -> Command {
    let mut cmd = Command::cargo_bin("stratus").expect("binary builds");
    // Isolate from ambient developer credentials.
    for var in [
        "STRATUS_ENDPOINT_URL",
        "AWS_ENDPOINT_URL",
        "AWS_ACCESS_KEY_ID",
        "AWS_SECRET_ACCESS_KEY",
        "AWS_SESSION_TOKEN",
        "AWS_REGION",
        "AWS_DEFAULT_REGION",
        "STRATUS_OUTPUT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn list_prints_the_catalog_without_credentials() {
    stratus()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("queue.create"))
        .stdout(predicate::str::contains("table.delete"));
}

#[test]
fn unknown_action_fails_with_a_pointer_to_list() {
    stratus()
        .args(["run", "queue.explode"])
        .env("STRATUS_ENDPOINT_URL", "http://127.0.0.1:1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown action"));
}

#[test]
fn missing_credentials_fail_before_any_call() {
    stratus()
        .args(["run", "queue.create", "--input", "queue_name=jobs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AWS_ACCESS_KEY_ID"));
}

#[test]
fn validation_failure_is_a_nonzero_exit() {
    stratus()
        .args(["run", "queue.create"])
        .env("STRATUS_ENDPOINT_URL", "http://127.0.0.1:1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("queue_name"));
}

#[test]
fn malformed_input_flag_is_rejected() {
    stratus()
        .args(["run", "queue.create", "--input", "queue_name"])
        .env("STRATUS_ENDPOINT_URL", "http://127.0.0.1:1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("name=value"));
}
