//! # StackToDate Manifest (`stacktodate.yml`)
//!
//! File: cli/src/core/manifest.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! The manifest is the user-owned record of a project's technology stack.
//! It is created by `init`, rewritten by `update` (and `pull --write`), read by
//! `check`, `push`, `pull` and `open`.
//!
//! ```yaml
//! uuid: 4f1b0e9c-2c1d-4b8e-9d7e-8d3a6f2b1c00
//! name: billing-service
//! stack:
//!   rails:
//!     version: "7.1"
//!     source: Gemfile
//!   ruby:
//!     version: "3.2"
//!     source: .ruby-version
//! ```
//!
//! Stack keys are kept in a `BTreeMap`, so both the written YAML and every
//! listing derived from it are sorted by technology name.
//!
use crate::common::fs::io;
use crate::core::error::{Result, StackError};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Technology name → chosen version.
pub type Stack = BTreeMap<String, StackEntry>;

/// One chosen, normalized version for a technology.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StackEntry {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub source: String,
}

impl StackEntry {
    pub fn new(version: impl Into<String>, source: impl Into<String>) -> Self {
        StackEntry {
            version: version.into(),
            source: source.into(),
        }
    }
}

/// The persisted project manifest.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stack: Stack,
}

impl Manifest {
    /// Reads and parses a manifest. Missing or malformed files are hard errors.
    pub fn load(path: &Path) -> Result<Manifest> {
        let content = io::read_file_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let manifest: Manifest = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        debug!(
            "Loaded manifest '{}' with {} stack entries from {}",
            manifest.name,
            manifest.stack.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Loads a manifest that must carry a uuid (push, pull, open).
    pub fn load_with_uuid(path: &Path) -> Result<Manifest> {
        let manifest = Manifest::load(path)?;
        if manifest.uuid.trim().is_empty() {
            return Err(anyhow!(StackError::Manifest(format!(
                "uuid not found in config file {}",
                path.display()
            ))));
        }
        Ok(manifest)
    }

    /// Serializes the manifest to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to create configuration")
    }

    /// Writes the manifest, overwriting any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;
        io::write_string_to_file(path, &yaml)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote manifest to {}", path.display());
        Ok(())
    }
}

/// Absolute directory containing the manifest; detection for `check` and
/// `update` runs there rather than in the process working directory.
pub fn manifest_dir(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("resolving path {}", path.display()))?;
    Ok(absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
