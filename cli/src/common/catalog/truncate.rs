//! # StackToDate Release Cycle Truncation
//!
//! File: cli/src/common/catalog/truncate.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! The catalog names release cycles at whatever granularity upstream uses:
//! Python tracks `3.11`, Node.js tracks `20`, Rails tracks `7.1`. Detected
//! versions are usually more precise (`3.11.4`), so before they are shown or
//! written to the manifest they are cut back to the longest prefix that is a
//! known cycle.
//!
//! Both functions are pure lookups over an already loaded catalog and never
//! fail; unknown products or versions pass through unchanged.
//!
use super::{find_product, Product};

/// Truncates `version` to a release cycle of `product_key`.
///
/// Tries, in order: the exact version, `major.minor`, `major`. Returns the
/// input unchanged when the key or version is empty, the product is not in
/// the catalog, or no candidate matches.
pub fn truncate_to_cycle(products: &[Product], product_key: &str, version: &str) -> String {
    if product_key.is_empty() || version.is_empty() {
        return version.to_string();
    }

    let Some(product) = find_product(products, product_key) else {
        return version.to_string();
    };
    let has_cycle = |cycle: &str| product.releases.iter().any(|r| r.release_cycle == cycle);

    if has_cycle(version) {
        return version.to_string();
    }

    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() >= 2 {
        let major_minor = format!("{}.{}", parts[0], parts[1]);
        if has_cycle(&major_minor) {
            return major_minor;
        }
    }
    if has_cycle(parts[0]) {
        return parts[0].to_string();
    }

    version.to_string()
}

/// Describes the support status of an exact release cycle.
///
/// Returns `" (supported)"` when the cycle has no EOL date, `" (EOL: <date>)"`
/// when it has one, and an empty string when the cycle is unknown.
pub fn eol_status(products: &[Product], product_key: &str, cycle: &str) -> String {
    if product_key.is_empty() || cycle.is_empty() {
        return String::new();
    }

    find_product(products, product_key)
        .and_then(|p| p.releases.iter().find(|r| r.release_cycle == cycle))
        .map(|release| match release.eol.as_deref() {
            None | Some("") => " (supported)".to_string(),
            Some(date) => format!(" (EOL: {})", date),
        })
        .unwrap_or_default()
}
