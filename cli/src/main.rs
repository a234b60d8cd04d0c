//! # StackToDate Main Entry Point
//!
//! File: cli/src/main.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! This file serves as the main entry point for the stacktodate CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading settings and printing the cached update notice
//! - Routing execution to the command handlers and mapping results to exit codes
//!
//! ## Exit Codes
//!
//! Every command exits `0` on success and `1` on error, except `check`:
//! `0` when the manifest matches, `1` on differences and `2` when the check
//! could not run.
//!
//! ## Examples
//!
//! ```bash
//! stacktodate autodetect
//! stacktodate init --name billing --no-interactive
//! stacktodate check --format json
//! stacktodate -vv push
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (init, check, push, ...)
mod common; // Shared building blocks (detection, catalog, API, credentials, ...)
mod core; // Settings, errors and the manifest

use commands::check::CheckStatus;

#[derive(Parser, Debug)]
#[command(
    name = "stacktodate",
    about = "Track technology lifecycle statuses and plan for end-of-life upgrades",
    long_about = "Detects the runtimes and frameworks a project uses, records them in \
                  stacktodate.yml and keeps them in sync with stacktodate.club.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Detect project technologies.
    #[command(alias = "detect")]
    Autodetect(commands::autodetect::AutodetectArgs),
    /// Initialize a new project manifest.
    Init(commands::init::InitArgs),
    /// Check the manifest against detected versions.
    Check(commands::check::CheckArgs),
    /// Re-detect technologies and update the manifest.
    Update(commands::update::UpdateArgs),
    /// Push the manifest's components to stacktodate.club.
    Push(commands::push::PushArgs),
    /// Show (and optionally write) the remote tech stack.
    Pull(commands::pull::PullArgs),
    /// Open the tech stack page in a browser.
    Open(commands::open::OpenArgs),
    /// Refresh the product catalog cache.
    FetchCatalog(commands::fetch_catalog::FetchCatalogArgs),
    /// Print version information.
    Version(commands::version::VersionArgs),
    /// Manage the API token.
    GlobalConfig(commands::global_config::GlobalConfigArgs),
}

impl Commands {
    /// Commands that print the cached update notice before running.
    fn shows_update_notice(&self) -> bool {
        matches!(
            self,
            Commands::Autodetect(_)
                | Commands::Init(_)
                | Commands::Check(_)
                | Commands::Update(_)
                | Commands::Push(_)
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let is_check = matches!(cli.command, Commands::Check(_));
    let settings = match crate::core::config::load_settings() {
        Ok(settings) => settings,
        Err(e) => exit_with_error(&e, if is_check { 2 } else { 1 }),
    };

    if settings.check_updates && cli.command.shows_update_notice() {
        print_update_notice(&settings);
    }

    let command_result = match cli.command {
        Commands::Check(args) => match commands::check::handle_check(args, &settings).await {
            Ok(CheckStatus::Match) => Ok(()),
            Ok(CheckStatus::Mismatch) => std::process::exit(1),
            Err(e) => exit_with_error(&e, 2),
        },
        Commands::Autodetect(args) => {
            commands::autodetect::handle_autodetect(args, &settings).await
        }
        Commands::Init(args) => commands::init::handle_init(args, &settings).await,
        Commands::Update(args) => commands::update::handle_update(args, &settings).await,
        Commands::Push(args) => commands::push::handle_push(args, &settings).await,
        Commands::Pull(args) => commands::pull::handle_pull(args, &settings).await,
        Commands::Open(args) => commands::open::handle_open(args, &settings).await,
        Commands::FetchCatalog(args) => {
            commands::fetch_catalog::handle_fetch_catalog(args, &settings).await
        }
        Commands::Version(args) => commands::version::handle_version(args, &settings).await,
        Commands::GlobalConfig(args) => {
            commands::global_config::handle_global_config(args, &settings).await
        }
    };

    if let Err(e) = command_result {
        exit_with_error(&e, 1);
    }
}

fn exit_with_error(e: &anyhow::Error, code: i32) -> ! {
    tracing::error!("Command execution failed: {:?}", e);
    eprintln!("Error: {:#}", e);
    std::process::exit(code);
}

/// Prints the update hint from the version cache; never hits the network.
fn print_update_notice(settings: &crate::core::config::Settings) {
    match common::versioncheck::VersionChecker::from_settings(settings) {
        Ok(checker) => {
            if let Some(notice) = checker.cached_notice(commands::version::VERSION) {
                eprintln!("{}\n", notice);
            }
        }
        Err(e) => tracing::debug!("Update notice skipped: {:#}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_alias() {
        let cli = Cli::try_parse_from(["stacktodate", "detect", "."]).unwrap();
        assert!(matches!(cli.command, Commands::Autodetect(_)));
    }

    #[test]
    fn test_global_verbose_flag() {
        let cli = Cli::try_parse_from(["stacktodate", "check", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.command.shows_update_notice());
    }

    #[test]
    fn test_version_command_skips_notice() {
        let cli = Cli::try_parse_from(["stacktodate", "version"]).unwrap();
        assert!(!cli.command.shows_update_notice());
    }
}
