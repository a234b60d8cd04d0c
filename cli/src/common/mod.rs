//! # StackToDate Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! This module is the entry point for the shared building blocks the
//! command handlers are assembled from. Commands (`commands::`) own the
//! user-facing flow; `common::` owns detection, caching, remote access and
//! terminal interaction; `core::` owns settings, errors and the manifest.
//!
//! ## Architecture
//!
//! - **`catalog`**: Product catalog types, the 24h on-disk cache and release cycle truncation.
//! - **`credentials`**: The API token provider chain (env → keychain → file).
//! - **`detectors`**: Marker-file scanners and the detection pipeline.
//! - **`fs`**: Filesystem helpers (reads, writes, private files, freshness).
//! - **`network`**: HTTP client construction and the stacktodate.club API client.
//! - **`process`**: Launching the system browser.
//! - **`system`**: Install method detection for upgrade hints.
//! - **`ui`**: Line prompts, candidate selection and hidden token input.
//! - **`version`**: Version string normalization and comparison.
//! - **`versioncheck`**: GitHub release lookup with its own cache.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{catalog::cache::CatalogCache, detectors};
//!
//! let products = CatalogCache::from_settings(&settings)?.get().await.ok();
//! let info = detectors::detect_project_info(&dir, products.as_deref());
//! ```
//!

/// Product catalog, its cache and cycle truncation.
pub mod catalog;
/// API token storage.
pub mod credentials;
/// Technology detection from project marker files.
pub mod detectors;
/// Filesystem operations.
pub mod fs;
/// HTTP client and stacktodate.club API.
pub mod network;
/// External process launching.
pub mod process;
/// Install method detection.
pub mod system;
/// Terminal prompts.
pub mod ui;
/// Version string helpers.
pub mod version;
/// CLI update check.
pub mod versioncheck;
