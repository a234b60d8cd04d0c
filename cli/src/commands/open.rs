//! # Open Command (`stacktodate open`)
//!
//! File: cli/src/commands/open.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! Opens `{api_url}/tech_stacks/{uuid}` in the default browser.
//!
use crate::common::process;
use crate::core::config::Settings;
use crate::core::error::Result;
use crate::core::manifest::Manifest;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct OpenArgs {
    /// Path to the manifest (default: stacktodate.yml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn tech_stack_url(api_url: &str, uuid: &str) -> String {
    format!("{}/tech_stacks/{}", api_url.trim_end_matches('/'), uuid)
}

pub async fn handle_open(args: OpenArgs, settings: &Settings) -> Result<()> {
    let config_path = settings.manifest_path(args.config.as_deref());
    let manifest = Manifest::load_with_uuid(&config_path).context("failed to load config")?;

    let url = tech_stack_url(&settings.api_url, &manifest.uuid);
    process::open_browser(&url).context("failed to open browser")?;

    println!("✓ Opening {} in your browser", url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tech_stack_url() {
        assert_eq!(
            tech_stack_url("https://stacktodate.club/", "abc-123"),
            "https://stacktodate.club/tech_stacks/abc-123"
        );
    }
}
