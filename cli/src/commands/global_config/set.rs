//! # Global Config Set (`stacktodate global-config set`)
//!
//! File: cli/src/commands/global_config/set.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
use crate::common::credentials::{CredentialStore, TOKEN_ENV_VAR};
use crate::common::ui;
use crate::core::config::Settings;
use crate::core::error::{Result, StackError};
use anyhow::anyhow;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct SetArgs {}

pub async fn handle_set(_args: SetArgs, settings: &Settings) -> Result<()> {
    let token = ui::prompt_hidden("Enter your stacktodate API token: ")?;
    let store = CredentialStore::from_settings(settings);
    let (storage, secure) = store_token(&store, &token)?;

    println!("✓ Token successfully configured");
    println!("  Storage: {}", storage);
    if !secure {
        println!();
        println!("⚠ The token is stored in plain text (file permissions 0600).");
        println!(
            "  For CI/headless environments, prefer: export {}=<your_token>",
            TOKEN_ENV_VAR
        );
    }
    Ok(())
}

/// Validates and stores the token; returns `(storage name, secure)`.
pub fn store_token(store: &CredentialStore, token: &str) -> Result<(String, bool)> {
    if token.trim().is_empty() {
        return Err(anyhow!(StackError::Validation(
            "token cannot be empty".to_string()
        )));
    }
    store.set(token.trim())
}
