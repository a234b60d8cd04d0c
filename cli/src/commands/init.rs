//! # Init Command (`stacktodate init`)
//!
//! File: cli/src/commands/init.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Creates `<PATH>/stacktodate.yml` for a project.
//!
//! ## Workflow
//!
//! 1. Unless `--skip-autodetect`, detect technologies under `PATH`, print them
//!    and choose one version per technology (first candidate with
//!    `--no-interactive`, otherwise prompt).
//! 2. Resolve the project identity:
//!    - `--create` registers a new tech stack remotely with the chosen
//!      components and uses the returned id as the uuid;
//!    - otherwise `--uuid` is used, or prompted for interactively.
//! 3. Resolve the name from `--name` or a prompt.
//! 4. Write the manifest, overwriting any existing one.
//!
use super::detection;
use crate::common::credentials::CredentialStore;
use crate::common::detectors;
use crate::common::network::api::{components_from_stack, ApiClient};
use crate::common::ui;
use crate::core::config::Settings;
use crate::core::error::Result;
use crate::core::manifest::{Manifest, Stack};
use anyhow::{bail, Context};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Project directory; the manifest is written here.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// UUID of an existing tech stack on stacktodate.club.
    #[arg(short, long, conflicts_with = "create")]
    pub uuid: Option<String>,

    /// Name of the project.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Skip autodetection of project technologies.
    #[arg(long)]
    pub skip_autodetect: bool,

    /// Use the first candidate of each technology without prompting.
    #[arg(long)]
    pub no_interactive: bool,

    /// Register a new tech stack on stacktodate.club and store its id.
    #[arg(long)]
    pub create: bool,
}

pub async fn handle_init(args: InitArgs, settings: &Settings) -> Result<()> {
    if !args.path.is_dir() {
        bail!("directory not found: {}", args.path.display());
    }
    println!("Initializing project in: {}", args.path.display());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let interactive = !args.no_interactive;

    let stack = if args.skip_autodetect {
        Stack::new()
    } else {
        let products = detection::load_catalog(settings).await;
        let info = detectors::detect_project_info(&args.path, products.as_deref());
        detection::print_detected_info(&info, products.as_deref());
        detection::select_candidates(&mut input, &mut output, &info, interactive)
            .context("failed to detect project")?
    };

    let name = match args.name {
        Some(name) => name,
        None if interactive || args.create => ui::prompt(&mut input, &mut output, "Enter name: ")?,
        None => String::new(),
    };

    let uuid = if args.create {
        create_remote_stack(settings, &name, &stack).await?
    } else {
        match args.uuid {
            Some(uuid) => uuid,
            None if interactive => ui::prompt(&mut input, &mut output, "Enter UUID: ")?,
            None => String::new(),
        }
    };

    let manifest = Manifest {
        uuid,
        name,
        stack,
    };
    let manifest_path = args.path.join(&settings.manifest_filename);
    manifest
        .save(&manifest_path)
        .with_context(|| format!("failed to write {}", settings.manifest_filename))?;

    println!("\nProject initialized successfully!");
    println!("Created {} with:", manifest_path.display());
    println!("  UUID: {}", manifest.uuid);
    println!("  Name: {}", manifest.name);
    if !manifest.stack.is_empty() {
        println!("  Stack:");
        detection::print_stack(&manifest.stack, "    ");
    }
    Ok(())
}

/// Registers the stack remotely and returns the server-assigned id.
async fn create_remote_stack(settings: &Settings, name: &str, stack: &Stack) -> Result<String> {
    if name.trim().is_empty() {
        bail!("a project name is required to create a tech stack (use --name)");
    }
    let token = CredentialStore::from_settings(settings).token()?;
    let client = ApiClient::new(&settings.api_url, token)?;
    let components = components_from_stack(stack);

    info!("Creating tech stack '{}' with {} components", name, components.len());
    let response = client
        .create_tech_stack(name, &components)
        .await
        .context("failed to create tech stack")?;
    println!(
        "✓ Created tech stack '{}' ({})",
        response.tech_stack.name, response.tech_stack.id
    );
    Ok(response.tech_stack.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_args_parsing() {
        let args = InitArgs::try_parse_from([
            "init",
            "app",
            "--uuid",
            "abc",
            "-n",
            "billing",
            "--no-interactive",
        ])
        .unwrap();
        assert_eq!(args.path, PathBuf::from("app"));
        assert_eq!(args.uuid.as_deref(), Some("abc"));
        assert_eq!(args.name.as_deref(), Some("billing"));
        assert!(args.no_interactive);
        assert!(!args.skip_autodetect);
    }

    #[test]
    fn test_init_uuid_conflicts_with_create() {
        assert!(InitArgs::try_parse_from(["init", "--uuid", "abc", "--create"]).is_err());
    }
}
