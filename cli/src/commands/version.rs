//! # Version Command (`stacktodate version`)
//!
//! File: cli/src/commands/version.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! Prints build information and, with `--check-updates`, asks GitHub
//! whether a newer release exists and how to upgrade.
//!
use crate::common::system;
use crate::common::version::compare_versions;
use crate::common::versioncheck::VersionChecker;
use crate::core::config::Settings;
use crate::core::error::Result;
use clap::Parser;

/// Release version of this binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
pub struct VersionArgs {
    /// Check for newer versions.
    #[arg(long)]
    pub check_updates: bool,
}

/// `stacktodate <version> (commit: <sha>, built: <date>)`; commit and date
/// come from `STACKTODATE_COMMIT` / `STACKTODATE_BUILD_DATE` at build time.
pub fn full_version() -> String {
    format!(
        "stacktodate {} (commit: {}, built: {})",
        VERSION,
        option_env!("STACKTODATE_COMMIT").unwrap_or("none"),
        option_env!("STACKTODATE_BUILD_DATE").unwrap_or("unknown")
    )
}

pub async fn handle_version(args: VersionArgs, settings: &Settings) -> Result<()> {
    println!("{}", full_version());
    if args.check_updates {
        check_for_updates(settings).await;
    }
    Ok(())
}

/// Reports update availability. Failures are printed, never returned.
async fn check_for_updates(settings: &Settings) {
    let latest = match VersionChecker::from_settings(settings) {
        Ok(checker) => checker.get_latest().await,
        Err(e) => Err(e),
    };
    let latest = match latest {
        Ok(latest) => latest,
        Err(e) => {
            eprintln!("Unable to check for updates: {:#}", e);
            return;
        }
    };

    match compare_versions(VERSION, &latest.version) {
        Ok(true) => {
            let method = system::detect_install_method();
            let instructions = system::upgrade_instructions(method, &latest.version);
            println!(
                "\n{}",
                update_message(VERSION, &latest.version, &latest.release_url, &instructions)
            );
        }
        Ok(false) => println!("\nYou are using the latest version."),
        Err(e) => eprintln!("Unable to compare versions: {:#}", e),
    }
}

fn update_message(current: &str, latest: &str, release_url: &str, instructions: &str) -> String {
    format!(
        "\nUpdate Available\n================\n\nCurrent version: {}\nLatest version:  {}\n\n{}\n\nRelease notes: {}\n",
        current, latest, instructions, release_url
    )
}
