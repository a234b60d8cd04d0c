//! # Autodetect Command (`stacktodate autodetect`)
//!
//! File: cli/src/commands/autodetect.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! Scans a directory and prints every detected technology version, with
//! end-of-life status when the product catalog is available. Nothing is
//! written.
//!
use super::detection;
use crate::common::detectors;
use crate::core::config::Settings;
use crate::core::error::Result;
use anyhow::bail;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct AutodetectArgs {
    /// Directory to scan.
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

pub async fn handle_autodetect(args: AutodetectArgs, settings: &Settings) -> Result<()> {
    if !args.path.is_dir() {
        bail!("directory not found: {}", args.path.display());
    }
    info!("Detecting technologies in {}", args.path.display());
    println!("Scanning directory: {}", args.path.display());

    let products = detection::load_catalog(settings).await;
    let info = detectors::detect_project_info(&args.path, products.as_deref());
    detection::print_detected_info(&info, products.as_deref());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autodetect_args_default_path() {
        let args = AutodetectArgs::try_parse_from(["autodetect"]).unwrap();
        assert_eq!(args.path, PathBuf::from("."));
        let args = AutodetectArgs::try_parse_from(["autodetect", "services/api"]).unwrap();
        assert_eq!(args.path, PathBuf::from("services/api"));
    }
}
