//! # Update Command (`stacktodate update`)
//!
//! File: cli/src/commands/update.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! Re-runs detection in the manifest's directory and rewrites the manifest's
//! stack, keeping its uuid and name. With `--skip-autodetect` the existing
//! stack is written back unchanged.
//!
use super::detection;
use crate::common::detectors;
use crate::core::config::Settings;
use crate::core::error::Result;
use crate::core::manifest::{manifest_dir, Manifest};
use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Path to the manifest (default: stacktodate.yml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep the current stack instead of detecting again.
    #[arg(long)]
    pub skip_autodetect: bool,

    /// Use the first candidate of each technology without prompting.
    #[arg(long)]
    pub no_interactive: bool,
}

pub async fn handle_update(args: UpdateArgs, settings: &Settings) -> Result<()> {
    let config_path = settings.manifest_path(args.config.as_deref());
    let mut manifest = Manifest::load(&config_path).context("failed to load config")?;
    let dir = manifest_dir(&config_path)?;

    println!("Updating stack in: {}", config_path.display());

    if !args.skip_autodetect {
        let products = detection::load_catalog(settings).await;
        let info = detectors::detect_project_info(&dir, products.as_deref());
        detection::print_detected_info(&info, products.as_deref());

        let stdin = io::stdin();
        manifest.stack = detection::select_candidates(
            &mut stdin.lock(),
            &mut io::stdout(),
            &info,
            !args.no_interactive,
        )
        .context("failed to detect project")?;
    }

    manifest
        .save(&config_path)
        .context("failed to write config")?;

    println!("\nStack updated successfully!");
    if !manifest.stack.is_empty() {
        println!("Updated stack:");
        detection::print_stack(&manifest.stack, "  ");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_args_parsing() {
        let args =
            UpdateArgs::try_parse_from(["update", "--config", "svc/stacktodate.yml", "--no-interactive"])
                .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("svc/stacktodate.yml")));
        assert!(args.no_interactive);
        assert!(!args.skip_autodetect);
    }
}
