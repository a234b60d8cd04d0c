//! # Global Config Command Group (`stacktodate global-config`)
//!
//! File: cli/src/commands/global_config/mod.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Manages the API token used by `push`, `pull`, `open` and `init --create`.
//!
//! ## Subcommands
//!
//! - `set`: prompt for the token (hidden input) and store it in the first
//!   writable store that accepts it (OS keychain, then the plaintext file).
//! - `status`: show whether a token is configured and where it comes from.
//! - `delete`: remove the stored token after typed confirmation.
//!
//! `STD_TOKEN` always takes precedence over stored tokens and is never
//! written or deleted by these commands.
//!
use crate::core::config::Settings;
use crate::core::error::Result;
use clap::{Parser, Subcommand};

mod delete;
mod set;
mod status;

#[derive(Parser, Debug)]
pub struct GlobalConfigArgs {
    #[command(subcommand)]
    command: GlobalConfigCommand,
}

#[derive(Subcommand, Debug)]
enum GlobalConfigCommand {
    /// Store the stacktodate API token.
    Set(set::SetArgs),
    /// Show where the API token comes from.
    Status(status::StatusArgs),
    /// Remove the stored API token.
    Delete(delete::DeleteArgs),
}

pub async fn handle_global_config(args: GlobalConfigArgs, settings: &Settings) -> Result<()> {
    match args.command {
        GlobalConfigCommand::Set(args) => set::handle_set(args, settings).await,
        GlobalConfigCommand::Status(args) => status::handle_status(args, settings).await,
        GlobalConfigCommand::Delete(args) => delete::handle_delete(args, settings).await,
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_subcommands() {
        let args = GlobalConfigArgs::try_parse_from(["global-config", "status"]).unwrap();
        assert!(matches!(args.command, GlobalConfigCommand::Status(_)));
        let args = GlobalConfigArgs::try_parse_from(["global-config", "delete"]).unwrap();
        assert!(matches!(args.command, GlobalConfigCommand::Delete(_)));
        assert!(GlobalConfigArgs::try_parse_from(["global-config", "rotate"]).is_err());
    }
}
