//! # StackToDate Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the stacktodate CLI.
//! Each command module defines its own clap arguments struct and an async
//! `handle_*` function taking the parsed arguments and the loaded
//! `Settings`; `main.rs` routes to them.
//!
//! ## Commands
//!
//! - `autodetect`: print the technologies detected in a directory
//! - `init`: create `stacktodate.yml`, optionally registering the stack remotely
//! - `check`: compare the manifest against detection (CI exit codes)
//! - `update`: re-detect and rewrite the manifest stack
//! - `push` / `pull`: sync components with stacktodate.club
//! - `open`: open the tech stack page in a browser
//! - `fetch-catalog`: refresh the product catalog cache
//! - `version`: build information and update check
//! - `global-config`: API token management (`set`, `status`, `delete`)
//!
//! `detection` is not a command; it holds the detection flow shared by
//! `autodetect`, `init`, `update` and `check`.
//!

pub mod autodetect;
pub mod check;
/// Catalog loading, detection rendering and candidate selection.
pub mod detection;
pub mod fetch_catalog;
/// Command group for the API token. Subcommands are declared in its `mod.rs`.
pub mod global_config;
pub mod init;
pub mod open;
pub mod pull;
pub mod push;
pub mod update;
pub mod version;
