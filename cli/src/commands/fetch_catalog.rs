//! # Fetch Catalog Command (`stacktodate fetch-catalog`)
//!
//! File: cli/src/commands/fetch_catalog.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! Refreshes the local product catalog regardless of its age. Progress goes
//! to stderr so the command stays quiet in pipelines.
//!
use crate::common::catalog::cache::CatalogCache;
use crate::core::config::Settings;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct FetchCatalogArgs {}

pub async fn handle_fetch_catalog(_args: FetchCatalogArgs, settings: &Settings) -> Result<()> {
    eprintln!("Fetching product catalog from {}...", settings.api_url);

    let cache = CatalogCache::from_settings(settings)?;
    let products = cache
        .fetch_and_cache()
        .await
        .context("failed to fetch catalog")?;

    eprintln!("✓ Successfully cached {} products", products.len());
    eprintln!("Cache location: {}", cache.path().display());
    Ok(())
}
