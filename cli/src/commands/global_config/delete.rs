//! # Global Config Delete (`stacktodate global-config delete`)
//!
//! File: cli/src/commands/global_config/delete.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
use crate::common::credentials::CredentialStore;
use crate::common::ui;
use crate::core::config::Settings;
use crate::core::error::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
pub struct DeleteArgs {}

pub async fn handle_delete(_args: DeleteArgs, settings: &Settings) -> Result<()> {
    let store = CredentialStore::from_settings(settings);
    let stdin = io::stdin();
    delete_with_confirmation(&store, &mut stdin.lock(), &mut io::stdout())
}

/// Deletes stored credentials once the user types `yes`.
pub fn delete_with_confirmation<R: BufRead, W: Write>(
    store: &CredentialStore,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    if store.lookup().is_none() {
        writeln!(output, "No credentials to delete")?;
        return Ok(());
    }

    if !ui::confirm_word(
        input,
        output,
        "Are you sure you want to delete your stored credentials?",
        "yes",
    )? {
        writeln!(output, "Cancelled - credentials not deleted")?;
        return Ok(());
    }

    store.delete()?;
    writeln!(output, "✓ Credentials deleted successfully")?;
    Ok(())
}
