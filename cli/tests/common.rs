//! # StackToDate CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every command
//! built here runs against an isolated home and data directory, with the
//! update check disabled and the API pointed at an address that refuses
//! connections, so no test reaches the network or the user's real state.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// An address nothing listens on; catalog fetches fail fast.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

/// Isolated home/data directories for one test.
pub struct TestEnv {
    pub home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        TestEnv {
            home: tempfile::tempdir().expect("Failed to create temp home"),
        }
    }

    pub fn data_dir(&self) -> std::path::PathBuf {
        self.home.path().join(".stacktodate")
    }

    /// `stacktodate` with the isolated environment and the unreachable API.
    pub fn cmd(&self) -> Command {
        self.cmd_with_api(UNREACHABLE_API)
    }

    pub fn cmd_with_api(&self, api_url: &str) -> Command {
        let mut cmd = Command::cargo_bin("stacktodate").expect("Failed to find stacktodate binary");
        cmd.env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join(".config"))
            .env("STD_DATA_DIR", self.data_dir())
            .env("STD_API_URL", api_url)
            .env("STD_DISABLE_VERSION_CHECK", "1")
            .env_remove("STD_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Writes `content` to `dir/name`, creating parent directories.
pub fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, content).expect("Failed to write test file");
}

/// A small Ruby on Rails project with a Node frontend.
pub fn rails_project() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create project dir");
    write(dir.path(), ".ruby-version", "3.2.2\n");
    write(
        dir.path(),
        "Gemfile",
        "source 'https://rubygems.org'\n\ngem 'rails', '~> 7.1.0'\n",
    );
    write(dir.path(), ".nvmrc", "v18.17.0\n");
    dir
}
