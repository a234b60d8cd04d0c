//! # Global Config Status (`stacktodate global-config status`)
//!
//! File: cli/src/commands/global_config/status.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
use crate::common::credentials::{CredentialInfo, CredentialStore, TOKEN_ENV_VAR};
use crate::core::config::Settings;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct StatusArgs {}

pub async fn handle_status(_args: StatusArgs, settings: &Settings) -> Result<()> {
    let info = CredentialStore::from_settings(settings).lookup();
    print!("{}", render_status(info.as_ref()));
    Ok(())
}

/// Status report for an optional credential lookup result.
pub fn render_status(info: Option<&CredentialInfo>) -> String {
    let Some(info) = info else {
        return format!(
            "Status: Not configured\n\nRun 'stacktodate global-config set' or export {}=<your_token>\n",
            TOKEN_ENV_VAR
        );
    };

    let mut out = format!("Status: Configured\nSource: {}\n", info.source);
    if !info.secure {
        out += "\n⚠ The token is stored in plain text.\n";
    }
    out
}
