//! # Global Config Integration Tests
//!
//! File: cli/tests/global_config.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! Only the environment-variable path is exercised here; keychain access
//! depends on the host.
//!

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_status_reports_env_token() {
    TestEnv::new()
        .cmd()
        .env("STD_TOKEN", "secret")
        .args(["global-config", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: Configured"))
        .stdout(predicate::str::contains("STD_TOKEN"));
}

#[test]
fn test_unknown_subcommand() {
    TestEnv::new()
        .cmd()
        .args(["global-config", "rotate"])
        .assert()
        .failure();
}
