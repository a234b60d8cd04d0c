//! # StackToDate Settings
//!
//! File: cli/src/core/config.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! This module builds the `Settings` struct every command handler receives.
//! Settings are resolved exactly once in `main.rs` and passed down explicitly;
//! no command reads process-wide flag state or environment variables on its own.
//!
//! ## Architecture
//!
//! Settings sources (later sources win):
//! 1. Default values defined in the code
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/stacktodate/config.toml`)
//! 3. Environment overrides: `STD_API_URL`, `STD_DATA_DIR`,
//!    `STD_DISABLE_VERSION_CHECK=1`
//!
//! Paths are expanded (`~` to the home directory) and the final settings are
//! validated before use.
//!
//! ## Examples
//!
//! ```toml
//! # ~/.config/stacktodate/config.toml
//! api_url = "https://stacktodate.club"
//! data_dir = "~/.stacktodate"
//! check_updates = true
//! manifest = "stacktodate.yml"
//! ```
//!
use crate::core::error::{Result, StackError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

/// Base URL of the stacktodate service.
pub const DEFAULT_API_URL: &str = "https://stacktodate.club";
/// File name of the project manifest.
pub const DEFAULT_MANIFEST_FILENAME: &str = "stacktodate.yml";
/// Freshness window shared by the product catalog and version caches.
pub const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const DATA_DIR_NAME: &str = ".stacktodate";
const PRODUCTS_CACHE_FILENAME: &str = "products-cache.json";
const VERSION_CACHE_FILENAME: &str = "version-cache.json";
const CREDENTIALS_FILENAME: &str = "credentials.yaml";

/// Resolved settings handed to every command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL for the catalog and tech stack API (no trailing slash).
    pub api_url: String,
    /// Directory holding caches and the plaintext credentials fallback.
    pub data_dir: PathBuf,
    /// Whether the cached update notice and update checks are enabled.
    pub check_updates: bool,
    /// Default manifest file name used when `--config` is not given.
    pub manifest_filename: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: default_data_dir(),
            check_updates: true,
            manifest_filename: DEFAULT_MANIFEST_FILENAME.to_string(),
        }
    }
}

impl Settings {
    /// Path of the product catalog cache (`products-cache.json`).
    pub fn products_cache_path(&self) -> PathBuf {
        self.data_dir.join(PRODUCTS_CACHE_FILENAME)
    }

    /// Path of the update-check cache (`version-cache.json`).
    pub fn version_cache_path(&self) -> PathBuf {
        self.data_dir.join(VERSION_CACHE_FILENAME)
    }

    /// Path of the plaintext credentials fallback (`credentials.yaml`).
    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join(CREDENTIALS_FILENAME)
    }

    /// Resolves the manifest path for a command: the explicit `--config`
    /// value if present, otherwise the configured default file name.
    pub fn manifest_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&self.manifest_filename))
    }
}

/// Representation of the optional user `config.toml`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct FileSettings {
    pub api_url: Option<String>,
    /// Data directory (can use ~). Will be expanded.
    pub data_dir: Option<String>,
    pub check_updates: Option<bool>,
    pub manifest: Option<String>,
}

/// Environment-provided overrides, captured once at startup.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvOverrides {
    pub api_url: Option<String>,
    pub data_dir: Option<String>,
    pub disable_version_check: bool,
}

impl EnvOverrides {
    /// Reads `STD_API_URL`, `STD_DATA_DIR` and `STD_DISABLE_VERSION_CHECK`.
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        EnvOverrides {
            api_url: non_empty("STD_API_URL"),
            data_dir: non_empty("STD_DATA_DIR"),
            disable_version_check: std::env::var("STD_DISABLE_VERSION_CHECK")
                .map(|v| v == "1")
                .unwrap_or(false),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME))
}

/// Loads settings from the user config file and the environment.
pub fn load_settings() -> Result<Settings> {
    let file_settings = load_user_settings()?.unwrap_or_default();
    let settings = resolve_settings(file_settings, &EnvOverrides::from_env());
    validate_settings(&settings).context("Settings validation failed")?;
    debug!("Final loaded settings: {:?}", settings);
    Ok(settings)
}

fn load_user_settings() -> Result<Option<FileSettings>> {
    if let Some(proj_dirs) = ProjectDirs::from("club", "StackToDate", "stacktodate") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user settings from: {}", config_path.display());
            load_settings_from_path(&config_path).map(Some)
        } else {
            debug!("User settings file not found at {}", config_path.display());
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_settings_from_path(path: &Path) -> Result<FileSettings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Layers defaults, file settings and environment overrides.
fn resolve_settings(file: FileSettings, env: &EnvOverrides) -> Settings {
    let defaults = Settings::default();

    let api_url = env
        .api_url
        .clone()
        .or(file.api_url)
        .unwrap_or(defaults.api_url);

    let data_dir = env
        .data_dir
        .clone()
        .or(file.data_dir)
        .map(|raw| PathBuf::from(shellexpand::tilde(&raw).into_owned()))
        .unwrap_or(defaults.data_dir);

    let check_updates = !env.disable_version_check && file.check_updates.unwrap_or(true);

    Settings {
        api_url: api_url.trim_end_matches('/').to_string(),
        data_dir,
        check_updates,
        manifest_filename: file.manifest.unwrap_or(defaults.manifest_filename),
    }
}

fn validate_settings(settings: &Settings) -> Result<()> {
    if !(settings.api_url.starts_with("http://") || settings.api_url.starts_with("https://")) {
        return Err(anyhow!(StackError::Config(format!(
            "Invalid api_url '{}'. Expected an http:// or https:// URL.",
            settings.api_url
        ))));
    }
    if settings.manifest_filename.trim().is_empty() {
        return Err(anyhow!(StackError::Config(
            "manifest file name cannot be empty".to_string()
        )));
    }
    if settings.data_dir.exists() && !settings.data_dir.is_dir() {
        return Err(anyhow!(StackError::Config(format!(
            "Configured data directory '{}' exists but is not a directory.",
            settings.data_dir.display()
        ))));
    }
    Ok(())
}
