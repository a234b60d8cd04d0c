//! # StackToDate Version String Utilities (`common::version`)
//!
//! File: cli/src/common/version.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Pure string helpers shared by detection and the update check:
//!
//! - **`clean_version`**: Reduces a raw requirement such as `~> 7.1.0` or
//!   `>= 18.0.0` to its numeric core (`7.1.0`, `18.0.0`).
//! - **`extract_version_from_docker_image`**: Pulls the version out of an
//!   image tag (`ruby:3.2.0-alpine` → `3.2.0`).
//! - **`compare_versions`**: Dot-wise numeric comparison used to decide
//!   whether a newer CLI release exists.
//!
//! None of these functions touch the filesystem or network.
//!
use crate::core::error::Result;
use anyhow::bail;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Comparison operators recognised in version requirements, longest first
/// so that `~>` wins over `~` and `>=` over `>`.
const VERSION_OPERATORS: [&str; 10] = ["~>", ">=", "<=", "!=", "==", "^", "~", ">", "<", "="];

static LEADING_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d.]+)").expect("valid leading-numeric regex"));

/// Returns the leading numeric-dot run of `value`, if it starts with one.
fn leading_numeric(value: &str) -> Option<&str> {
    LEADING_NUMERIC
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Strips one leading comparison operator and keeps the numeric core.
///
/// `"~> 7.1.0"` → `"7.1.0"`, `"3.11.0-alpine"` → `"3.11.0"`, `"  "` → `""`.
/// Values with no leading digits after the operator (e.g. `lts/*`) are
/// returned trimmed but otherwise unchanged.
pub fn clean_version(raw: &str) -> String {
    let mut version = raw.trim();

    if let Some(op) = VERSION_OPERATORS.iter().find(|op| version.starts_with(**op)) {
        version = version[op.len()..].trim();
    }

    leading_numeric(version).unwrap_or(version).to_string()
}

/// Extracts the version part of a Docker image reference.
///
/// The tag is the text after the first colon (up to any following colon).
/// A tag starting with digits yields its numeric-dot run (`18-alpine` →
/// `18`); any other tag is returned whole (`v1.0`). An image without a
/// colon is returned unchanged.
pub fn extract_version_from_docker_image(image: &str) -> String {
    let mut parts = image.split(':');
    let _repo = parts.next();
    let tag = match parts.next() {
        Some(tag) => tag,
        None => return image.to_string(),
    };

    leading_numeric(tag).unwrap_or(tag).to_string()
}

/// Returns true when `latest` is newer than `current`.
///
/// `dev` builds are always older than any release. A leading `v` is
/// ignored on both sides; missing components count as zero, so `1.2` and
/// `1.2.0` are equal.
///
/// # Errors
///
/// Returns an error when either version contains a non-numeric component.
pub fn compare_versions(current: &str, latest: &str) -> Result<bool> {
    if current == "dev" {
        return Ok(true);
    }

    let current_parts = numeric_parts(current, "current")?;
    let latest_parts = numeric_parts(latest, "latest")?;
    let len = current_parts.len().max(latest_parts.len());

    for i in 0..len {
        let curr = current_parts.get(i).copied().unwrap_or(0);
        let lat = latest_parts.get(i).copied().unwrap_or(0);
        match lat.cmp(&curr) {
            Ordering::Greater => return Ok(true),
            Ordering::Less => return Ok(false),
            Ordering::Equal => continue,
        }
    }
    Ok(false)
}

fn numeric_parts(version: &str, label: &str) -> Result<Vec<u64>> {
    let trimmed = version.trim().trim_start_matches('v');
    trimmed
        .split('.')
        .map(|part| match part.trim().parse::<u64>() {
            Ok(n) => Ok(n),
            Err(_) => bail!("invalid {} version format: {}", label, trimmed),
        })
        .collect()
}
