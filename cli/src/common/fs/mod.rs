//! # StackToDate Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Entry point for filesystem helpers. Everything currently lives in the
//! `io` submodule: directory creation, whole-file reads and writes, the
//! owner-only writer used for credentials, and mtime-based freshness checks
//! used by both on-disk caches.
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::ensure_dir_exists(&settings.data_dir)?;
//! let fresh = io::modified_within(&settings.products_cache_path(), CACHE_TTL);
//! ```
//!

/// Basic file I/O operations (reads, writes, private files, freshness checks).
pub mod io;
