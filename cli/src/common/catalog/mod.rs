//! # StackToDate Product Catalog (`common::catalog`)
//!
//! File: cli/src/common/catalog/mod.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! The product catalog lists every product stacktodate.club tracks together
//! with its release cycles and end-of-life dates. The CLI uses it for two
//! things:
//!
//! - **`cache`**: Keeps a local, 24-hour snapshot of the catalog in
//!   `~/.stacktodate/products-cache.json`, refetching when it goes stale and
//!   falling back to the stale copy when the network is unavailable.
//! - **`truncate`**: Maps a detected version (`3.11.4`) onto the release
//!   cycle label the catalog uses (`3.11`) and reports EOL status.
//!
//! The types below mirror the JSON returned by `GET /api/v1/products`.
//!
use serde::{Deserialize, Deserializer, Serialize};

pub mod cache;
pub mod truncate;

/// A tracked product and its release cycles.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub releases: Vec<Release>,
}

/// One release cycle of a product.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub release_cycle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eol: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lts: bool,
}

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Finds a product by its catalog key (`ruby`, `nodejs`, ...).
pub fn find_product<'a>(products: &'a [Product], key: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.key == key)
}
