//! # StackToDate Catalog Cache
//!
//! File: cli/src/common/catalog/cache.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! A locally persisted, time-boxed snapshot of the product catalog.
//!
//! ## Architecture
//!
//! The cache has two states, decided by the file's modification time:
//!
//! - **Fresh** (younger than `CACHE_TTL`, 24h): `get` returns the snapshot
//!   without touching the network.
//! - **Stale / Missing**: `get` fetches `GET {api_url}/api/v1/products`,
//!   overwrites the file with `{timestamp, products}` and returns the new
//!   data. If the fetch fails, the last snapshot is returned regardless of
//!   age; only when no snapshot can be loaded does the fetch error propagate.
//!
//! Writes are whole-file overwrites. Concurrent invocations are not
//! coordinated; the last writer wins.
//!
use super::Product;
use crate::common::fs::io;
use crate::common::network;
use crate::core::config::{Settings, CACHE_TTL};
use crate::core::error::{Result, StackError};
use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// On-disk representation of the catalog snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProductsCache {
    pub timestamp: DateTime<Utc>,
    pub products: Vec<Product>,
}

/// Handle on the catalog cache file and the endpoint that refreshes it.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    path: PathBuf,
    api_url: String,
    ttl: Duration,
    client: reqwest::Client,
}

impl CatalogCache {
    /// Creates a cache handle from the resolved settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.products_cache_path(), &settings.api_url)
    }

    /// Creates a cache handle for an explicit file and API base URL.
    pub fn new(path: PathBuf, api_url: &str) -> Result<Self> {
        Ok(CatalogCache {
            path,
            api_url: api_url.trim_end_matches('/').to_string(),
            ttl: CACHE_TTL,
            client: network::http_client(None)?,
        })
    }

    /// Location of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the cache file exists and is younger than the TTL.
    pub fn is_valid(&self) -> bool {
        io::modified_within(&self.path, self.ttl)
    }

    /// Loads the snapshot from disk. A malformed file is a hard error.
    pub fn load(&self) -> Result<ProductsCache> {
        let content = io::read_file_to_string(&self.path).context("failed to read cache file")?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse cache file {}", self.path.display()))
    }

    /// Overwrites the snapshot with `products` stamped with the current time.
    pub fn save(&self, products: &[Product]) -> Result<()> {
        let cache = ProductsCache {
            timestamp: Utc::now(),
            products: products.to_vec(),
        };
        let data = serde_json::to_string_pretty(&cache).context("failed to marshal cache")?;
        io::write_string_to_file(&self.path, &data).context("failed to write cache file")?;
        debug!("Cached {} products at {}", products.len(), self.path.display());
        Ok(())
    }

    /// Downloads the catalog. Any non-200 response or unparsable body is an
    /// error; there is no retry.
    pub async fn fetch(&self) -> Result<Vec<Product>> {
        let url = format!("{}/api/v1/products", self.api_url);
        info!("Fetching product catalog from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("failed to fetch from API")?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(StackError::Catalog(format!(
                "API error (status {}): {}",
                status.as_u16(),
                body
            ))));
        }

        let products: Vec<Product> = response
            .json()
            .await
            .map_err(|e| anyhow!(StackError::Catalog(format!("failed to parse API response: {e}"))))?;
        Ok(products)
    }

    /// Fetches the catalog and persists it.
    pub async fn fetch_and_cache(&self) -> Result<Vec<Product>> {
        let products = self.fetch().await?;
        self.save(&products)?;
        Ok(products)
    }

    /// Returns the catalog, refreshing it when stale.
    pub async fn get(&self) -> Result<Vec<Product>> {
        if self.is_valid() {
            match self.load() {
                Ok(cache) => {
                    debug!("Using fresh catalog cache ({} products)", cache.products.len());
                    return Ok(cache.products);
                }
                Err(e) => warn!("Ignoring unreadable catalog cache: {:#}", e),
            }
        }

        match self.fetch_and_cache().await {
            Ok(products) => Ok(products),
            Err(fetch_err) => match self.load() {
                Ok(stale) => {
                    warn!(
                        "Catalog refresh failed ({:#}); using cached snapshot from {}",
                        fetch_err, stale.timestamp
                    );
                    Ok(stale.products)
                }
                Err(_) => Err(fetch_err
                    .context("failed to fetch products and no valid cache available")),
            },
        }
    }
}
