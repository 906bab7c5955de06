//! Integration tests for the cascade-merge binary

#![allow(deprecated)] // cargo_bin is the standard way to test CLI binaries

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const ENV_INPUTS: [&str; 9] = [
    "INPUT_PREFIXES",
    "INPUT_REF_BRANCH",
    "INPUT_MERGE_METHOD",
    "INPUT_GITHUB_TOKEN",
    "INPUT_MERGE_TOKEN",
    "GITHUB_REPOSITORY",
    "GITHUB_ACTOR",
    "GITHUB_API_URL",
    "GITHUB_EVENT_PATH",
];

/// The binary with no action inputs inherited from the test environment
fn cascade_merge() -> Command {
    let mut cmd = Command::cargo_bin("cascade-merge").unwrap();
    for var in ENV_INPUTS {
        cmd.env_remove(var);
    }
    cmd
}

fn event_file(merged: bool) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let payload = serde_json::json!({
        "pull_request": {
            "number": 12,
            "merged": merged,
            "head": { "ref": "my-feature" },
            "base": { "ref": "release/1.0" }
        }
    });
    write!(file, "{payload}").unwrap();
    file
}

// =============================================================================
// CLI Tests
// =============================================================================

#[test]
fn test_cli_help() {
    cascade_merge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Cascade merged pull requests through ordered release branches",
        ));
}

#[test]
fn test_cli_version() {
    cascade_merge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_run_help() {
    cascade_merge()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--prefixes"))
        .stdout(predicate::str::contains("--merge-token"))
        .stdout(predicate::str::contains("--fail-on-error"));
}

#[test]
fn test_plan_help() {
    cascade_merge()
        .args(["plan", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("without changing anything"));
}

#[test]
fn test_missing_prefixes_fails() {
    cascade_merge()
        .args([
            "run",
            "--ref-branch",
            "develop",
            "--repository",
            "owner/repo",
            "--head",
            "a",
            "--base",
            "release/1.0",
            "--pr-number",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing prefixes"));
}

#[test]
fn test_invalid_merge_method_rejected() {
    cascade_merge()
        .args(["run", "--merge-method", "fast-forward"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fast-forward"));
}

#[test]
fn test_unmerged_event_is_a_no_op() {
    let event = event_file(false);

    cascade_merge()
        .arg("run")
        .env("INPUT_PREFIXES", "release/")
        .env("INPUT_REF_BRANCH", "develop")
        .env("GITHUB_REPOSITORY", "owner/repo")
        .env("GITHUB_EVENT_PATH", event.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("PR #12 was not merged"));
}

#[test]
fn test_plan_lists_hops_from_branch_listing() {
    let mut server = mockito::Server::new();
    let branches = server
        .mock("GET", "/repos/owner/repo/branches")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!([
                { "name": "release/1.0" },
                { "name": "release/1.2" },
                { "name": "develop" }
            ])
            .to_string(),
        )
        .create();
    let event = event_file(true);

    cascade_merge()
        .args([
            "plan",
            "--prefixes",
            "release/",
            "--ref-branch",
            "develop",
            "--repository",
            "owner/repo",
            "--github-token",
            "test-token",
            "--api-url",
            server.url().as_str(),
        ])
        .arg("--event-path")
        .arg(event.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 branches on owner/repo."))
        .stdout(predicate::str::contains("Would cascade:"))
        .stdout(predicate::str::contains("release/1.2"));

    branches.assert();
}

#[test]
fn test_plan_with_nothing_to_cascade() {
    let mut server = mockito::Server::new();
    let _branches = server
        .mock("GET", "/repos/owner/repo/branches")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!([{ "name": "main" }]).to_string())
        .create();

    cascade_merge()
        .args([
            "plan",
            "--prefixes",
            "release/",
            "--ref-branch",
            "main",
            "--repository",
            "owner/repo",
            "--github-token",
            "test-token",
            "--api-url",
            server.url().as_str(),
            "--head",
            "feature/x",
            "--base",
            "main",
            "--pr-number",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to cascade."));
}
