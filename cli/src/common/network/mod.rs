//! # StackToDate Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! This module centralizes HTTP client construction and the stacktodate.club
//! REST client.
//!
//! ## Architecture
//!
//! - **`http_client`**: Builds a `reqwest::Client` with the CLI user agent and
//!   an optional overall request timeout. The catalog and remote stack calls
//!   use no timeout; the update check uses a fixed 10 seconds.
//! - **`api`**: `ApiClient`, the typed wrapper around the `tech_stacks`
//!   endpoints, including the mapping of HTTP statuses onto `StackError`s.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::network::{self, api::ApiClient};
//!
//! let client = network::http_client(Some(Duration::from_secs(10)))?;
//! let api = ApiClient::new(&settings.api_url, token)?;
//! let stack = api.get_tech_stack(&manifest.uuid).await?;
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use std::time::Duration;

pub mod api;

/// User agent sent with every request.
pub const USER_AGENT: &str = "stacktodate-cli";

/// Builds an HTTP client, optionally bounded by `timeout`.
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to create HTTP client")
}
