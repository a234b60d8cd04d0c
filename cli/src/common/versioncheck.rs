//! # StackToDate Update Check (`common::versioncheck`)
//!
//! File: cli/src/common/versioncheck.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Finds out whether a newer CLI release exists on GitHub.
//!
//! ## Architecture
//!
//! - The latest release is cached in `<data_dir>/version-cache.json` as
//!   `{timestamp, latestVersion, releaseUrl}` for 24 hours (by file mtime),
//!   with the same stale-fallback policy as the product catalog.
//! - Refreshing calls the GitHub releases API with a fixed 10 second timeout.
//!   A `403` is reported as rate limiting.
//! - `cached_notice` never touches the network; `main` uses it to print a
//!   one-line hint before selected commands.
//!
use crate::common::fs::io;
use crate::common::network;
use crate::common::version::compare_versions;
use crate::core::config::{Settings, CACHE_TTL};
use crate::core::error::Result;
use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// GitHub endpoint for the latest published release.
pub const GITHUB_LATEST_RELEASE_URL: &str =
    "https://api.github.com/repos/stacktodate/stacktodate-cli/releases/latest";

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// On-disk representation of the last known release.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VersionCache {
    pub timestamp: DateTime<Utc>,
    pub latest_version: String,
    pub release_url: String,
}

#[derive(Deserialize, Debug)]
struct GitHubRelease {
    tag_name: String,
    #[serde(default)]
    html_url: String,
}

/// The newest release and where to read about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRelease {
    pub version: String,
    pub release_url: String,
}

pub struct VersionChecker {
    cache_path: PathBuf,
    release_url: String,
    client: reqwest::Client,
}

impl VersionChecker {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.version_cache_path(), GITHUB_LATEST_RELEASE_URL)
    }

    pub fn new(cache_path: PathBuf, release_url: &str) -> Result<Self> {
        Ok(VersionChecker {
            cache_path,
            release_url: release_url.to_string(),
            client: network::http_client(Some(HTTP_TIMEOUT))?,
        })
    }

    pub fn is_cache_valid(&self) -> bool {
        io::modified_within(&self.cache_path, CACHE_TTL)
    }

    pub fn load_cache(&self) -> Result<VersionCache> {
        let content =
            io::read_file_to_string(&self.cache_path).context("failed to read cache file")?;
        serde_json::from_str(&content).context("failed to parse cache file")
    }

    pub fn save_cache(&self, release: &LatestRelease) -> Result<()> {
        let cache = VersionCache {
            timestamp: Utc::now(),
            latest_version: release.version.clone(),
            release_url: release.release_url.clone(),
        };
        let data = serde_json::to_string(&cache).context("failed to marshal cache")?;
        io::write_string_to_file(&self.cache_path, &data).context("failed to write cache file")
    }

    /// Asks GitHub for the latest release.
    pub async fn fetch_latest(&self) -> Result<LatestRelease> {
        debug!("Checking for updates at {}", self.release_url);
        let response = self
            .client
            .get(&self.release_url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .context("fetching from GitHub")?;

        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            bail!("rate limit exceeded");
        }
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            bail!("GitHub API error (status {}): {}", status.as_u16(), body);
        }

        let release: GitHubRelease = response.json().await.context("parsing response")?;
        Ok(LatestRelease {
            version: release.tag_name,
            release_url: release.html_url,
        })
    }

    /// Returns the latest release, preferring a fresh cache and falling back
    /// to a stale one when GitHub cannot be reached.
    pub async fn get_latest(&self) -> Result<LatestRelease> {
        if self.is_cache_valid() {
            if let Ok(cache) = self.load_cache() {
                return Ok(LatestRelease {
                    version: cache.latest_version,
                    release_url: cache.release_url,
                });
            }
        }

        match self.fetch_latest().await {
            Ok(release) => {
                if let Err(e) = self.save_cache(&release) {
                    warn!("Could not cache version information: {:#}", e);
                }
                Ok(release)
            }
            Err(fetch_err) => match self.load_cache() {
                Ok(stale) => Ok(LatestRelease {
                    version: stale.latest_version,
                    release_url: stale.release_url,
                }),
                Err(_) => Err(anyhow!("failed to fetch version: {:#}", fetch_err)),
            },
        }
    }

    /// One-line hint when a fresh cache knows of a newer release than
    /// `current`. Never touches the network.
    pub fn cached_notice(&self, current: &str) -> Option<String> {
        if !self.is_cache_valid() {
            return None;
        }
        let cache = self.load_cache().ok()?;
        if !compare_versions(current, &cache.latest_version).ok()? {
            return None;
        }
        Some(format!(
            "A new version of stacktodate is available: {} → {}\nRun 'stacktodate version --check-updates' for upgrade instructions.",
            current, cache.latest_version
        ))
    }
}
