//! # Pull Command (`stacktodate pull`)
//!
//! File: cli/src/commands/pull.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Fetches the manifest's remote tech stack and shows it next to the local
//! manifest, one line per technology known on either side.
//!
//! With `--write`, remote versions are copied into the manifest: existing
//! entries keep their `source`, technologies only known remotely get the
//! source `stacktodate.club`, and local-only entries are left alone. An
//! empty local name is filled from the remote stack.
//!
use crate::common::credentials::CredentialStore;
use crate::common::network::api::{ApiClient, TechStack};
use crate::core::config::Settings;
use crate::core::error::Result;
use crate::core::manifest::{Manifest, Stack, StackEntry};
use anyhow::Context;
use clap::Parser;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Source recorded for versions that only came from the remote stack.
pub const REMOTE_SOURCE: &str = "stacktodate.club";

#[derive(Parser, Debug)]
pub struct PullArgs {
    /// Path to the manifest (default: stacktodate.yml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the remote versions into the manifest.
    #[arg(long)]
    pub write: bool,
}

pub async fn handle_pull(args: PullArgs, settings: &Settings) -> Result<()> {
    let config_path = settings.manifest_path(args.config.as_deref());
    let mut manifest = Manifest::load_with_uuid(&config_path).context("failed to load config")?;
    let token = CredentialStore::from_settings(settings).token()?;

    let remote = ApiClient::new(&settings.api_url, token)?
        .get_tech_stack(&manifest.uuid)
        .await
        .context("failed to fetch tech stack")?
        .tech_stack;

    println!("Remote tech stack: {} ({})", remote.name, remote.id);
    print!("{}", render_diff(&manifest.stack, &remote));

    if args.write {
        let changed = merge_remote(&mut manifest, &remote);
        manifest
            .save(&config_path)
            .context("failed to write config")?;
        println!(
            "\n✓ Updated {} ({} entries changed)",
            config_path.display(),
            changed
        );
    }
    Ok(())
}

/// One line per technology: local version, remote version and a marker.
pub fn render_diff(local: &Stack, remote: &TechStack) -> String {
    let remote_versions: Stack = remote
        .components
        .iter()
        .map(|c| (c.name.clone(), StackEntry::new(c.version.clone(), REMOTE_SOURCE)))
        .collect();
    let names: BTreeSet<&String> = local.keys().chain(remote_versions.keys()).collect();

    if names.is_empty() {
        return "\nNo components on either side\n".to_string();
    }

    let mut out = format!("\n  {:<12} {:<12} {:<12}\n", "TECHNOLOGY", "LOCAL", "REMOTE");
    for name in names {
        let local_version = local.get(name).map(|e| e.version.as_str()).unwrap_or("-");
        let remote_version = remote_versions
            .get(name)
            .map(|e| e.version.as_str())
            .unwrap_or("-");
        let marker = if local_version == remote_version { "✓" } else { "≠" };
        out += &format!(
            "  {:<12} {:<12} {:<12} {}\n",
            name, local_version, remote_version, marker
        );
    }
    out
}

/// Copies remote versions into `manifest`; returns how many entries changed.
pub fn merge_remote(manifest: &mut Manifest, remote: &TechStack) -> usize {
    if manifest.name.trim().is_empty() {
        manifest.name = remote.name.clone();
    }

    let mut changed = 0;
    for component in &remote.components {
        match manifest.stack.get_mut(&component.name) {
            Some(entry) if entry.version == component.version => {}
            Some(entry) => {
                entry.version = component.version.clone();
                changed += 1;
            }
            None => {
                manifest.stack.insert(
                    component.name.clone(),
                    StackEntry::new(component.version.clone(), REMOTE_SOURCE),
                );
                changed += 1;
            }
        }
    }
    changed
}
