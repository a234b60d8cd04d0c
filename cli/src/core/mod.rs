//! # StackToDate Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure shared by every command:
//! - `config`: Settings resolution (defaults, user `config.toml`, environment)
//! - `error`: Error types and the `Result` alias
//! - `manifest`: The `stacktodate.yml` model and its persistence
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config::Settings;
//! use crate::core::error::{Result, StackError};
//! use crate::core::manifest::{Manifest, StackEntry};
//! ```
//!
pub mod config;
pub mod error;
pub mod manifest;
