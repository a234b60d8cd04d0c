//! # StackToDate System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Works out how the running binary was installed so that update notices can
//! print the right upgrade instruction.
//!
//! A binary counts as a Homebrew install when its path lies in a Homebrew
//! prefix or when `brew list stacktodate` succeeds; everything else is
//! treated as a downloaded release binary.
//!
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

const RELEASES_URL: &str = "https://github.com/stacktodate/stacktodate-cli/releases";

const HOMEBREW_PATTERNS: [&str; 5] = [
    "/Cellar/stacktodate/",
    "/opt/homebrew/Cellar/stacktodate",
    "/opt/homebrew/bin/stacktodate",
    "/usr/local/bin/stacktodate",
    "/usr/local/Cellar/stacktodate/",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMethod {
    Homebrew,
    Binary,
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallMethod::Homebrew => write!(f, "homebrew"),
            InstallMethod::Binary => write!(f, "binary"),
        }
    }
}

/// Determines how the current executable was installed.
pub fn detect_install_method() -> InstallMethod {
    let from_path = std::env::current_exe()
        .map(|exe| is_homebrew_path(&exe))
        .unwrap_or(false);

    if from_path || brew_knows_stacktodate() {
        InstallMethod::Homebrew
    } else {
        InstallMethod::Binary
    }
}

/// True when `exe` sits in one of the well-known Homebrew locations.
pub fn is_homebrew_path(exe: &Path) -> bool {
    let path = exe.to_string_lossy();
    HOMEBREW_PATTERNS.iter().any(|pattern| path.contains(pattern))
}

/// Runs `brew list stacktodate` silently; a missing `brew` means no.
fn brew_knows_stacktodate() -> bool {
    match Command::new("brew")
        .args(["list", "stacktodate"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => status.success(),
        Err(e) => {
            debug!("brew check skipped: {}", e);
            false
        }
    }
}

/// The upgrade hint shown next to an update notice.
pub fn upgrade_instructions(method: InstallMethod, version: &str) -> String {
    match method {
        InstallMethod::Homebrew => "Upgrade: brew upgrade stacktodate".to_string(),
        InstallMethod::Binary => format!("Download: {}/tag/{}", RELEASES_URL, version),
    }
}
