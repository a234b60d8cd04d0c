//! # Push Command (`stacktodate push`)
//!
//! File: cli/src/commands/push.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! Replaces the components of the manifest's remote tech stack with the
//! versions recorded in the manifest.
//!
use crate::common::credentials::CredentialStore;
use crate::common::network::api::{components_from_stack, ApiClient};
use crate::core::config::Settings;
use crate::core::error::Result;
use crate::core::manifest::Manifest;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct PushArgs {
    /// Path to the manifest (default: stacktodate.yml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub async fn handle_push(args: PushArgs, settings: &Settings) -> Result<()> {
    let config_path = settings.manifest_path(args.config.as_deref());
    let manifest = Manifest::load_with_uuid(&config_path).context("failed to load config")?;
    let token = CredentialStore::from_settings(settings).token()?;

    let components = components_from_stack(&manifest.stack);
    info!(
        "Pushing {} components to tech stack {}",
        components.len(),
        manifest.uuid
    );

    ApiClient::new(&settings.api_url, token)?
        .push_components(&manifest.uuid, &components)
        .await
        .context("failed to push to API")?;

    println!("✓ Successfully pushed {} components", components.len());
    Ok(())
}
