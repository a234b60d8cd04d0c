//! # StackToDate Process Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Launches external programs on behalf of the CLI. Currently this is only
//! the system browser used by `stacktodate open`.
//!
//! The browser command is chosen per platform (`open` on macOS, `xdg-open`
//! on Linux and the BSDs, `cmd /c start` on Windows). A non-empty `BROWSER`
//! environment variable overrides the platform default.
//!
use crate::core::error::Result;
use anyhow::{bail, Context};
use std::process::{Command, Stdio};
use tracing::debug;

/// Returns the program and arguments that open `url`, or `None` on
/// platforms without a known opener.
pub fn browser_command(url: &str) -> Option<(String, Vec<String>)> {
    if let Some(browser) = std::env::var("BROWSER").ok().filter(|b| !b.trim().is_empty()) {
        return Some((browser, vec![url.to_string()]));
    }

    let (program, args): (&str, Vec<&str>) = if cfg!(target_os = "macos") {
        ("open", vec![url])
    } else if cfg!(target_os = "windows") {
        ("cmd", vec!["/c", "start", url])
    } else if cfg!(unix) {
        ("xdg-open", vec![url])
    } else {
        return None;
    };
    Some((
        program.to_string(),
        args.into_iter().map(str::to_string).collect(),
    ))
}

/// Opens `url` in the default browser and waits for the opener to exit.
pub fn open_browser(url: &str) -> Result<()> {
    let Some((program, args)) = browser_command(url) else {
        bail!("unsupported operating system: {}", std::env::consts::OS);
    };

    debug!("Running: {} {:?}", program, args);
    let status = Command::new(&program)
        .args(&args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("Failed to launch '{}'", program))?;

    if !status.success() {
        bail!("'{}' exited with {}", program, status);
    }
    Ok(())
}
