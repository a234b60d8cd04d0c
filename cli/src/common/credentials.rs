//! # StackToDate Credential Store
//!
//! File: cli/src/common/credentials.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! The API token is looked up through an ordered chain of providers behind
//! one `CredentialProvider` trait:
//!
//! 1. **`EnvProvider`**: the `STD_TOKEN` environment variable. Read-only;
//!    always wins, which makes CI and headless use straightforward.
//! 2. **`KeyringProvider`**: the OS keychain (service `stacktodate`, user
//!    `token`) via the `keyring` crate.
//! 3. **`FileProvider`**: plaintext `<data_dir>/credentials.yaml` containing
//!    `token: ...`, written `0600` inside a `0700` directory.
//!
//! ## Semantics
//!
//! - `get` returns the first non-empty token along with the provider that
//!   supplied it. Provider errors (no keychain daemon, unreadable file) are
//!   traced and treated as "not here".
//! - `set` stores into the first writable provider that accepts the token.
//! - `delete` removes from every writable provider and only fails when all
//!   removals failed.
//!
use crate::common::fs::io;
use crate::core::config::Settings;
use crate::core::error::{Result, StackError};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "STD_TOKEN";
const KEYRING_SERVICE: &str = "stacktodate";
const KEYRING_USER: &str = "token";

/// A place a token can be read from and, possibly, written to.
pub trait CredentialProvider {
    /// Human-readable description used in status output.
    fn name(&self) -> String;

    /// Whether the storage protects the token at rest.
    fn is_secure(&self) -> bool;

    fn is_writable(&self) -> bool {
        true
    }

    /// Returns the stored token, `None` when there is none.
    fn get(&self) -> Result<Option<String>>;

    fn set(&self, token: &str) -> Result<()>;

    fn delete(&self) -> Result<()>;
}

/// Reads the token from an environment variable.
pub struct EnvProvider {
    var: String,
}

impl EnvProvider {
    pub fn new(var: impl Into<String>) -> Self {
        EnvProvider { var: var.into() }
    }
}

impl CredentialProvider for EnvProvider {
    fn name(&self) -> String {
        format!("{} environment variable", self.var)
    }

    fn is_secure(&self) -> bool {
        true
    }

    fn is_writable(&self) -> bool {
        false
    }

    fn get(&self) -> Result<Option<String>> {
        Ok(std::env::var(&self.var)
            .ok()
            .filter(|token| !token.trim().is_empty()))
    }

    fn set(&self, _token: &str) -> Result<()> {
        Err(anyhow!(StackError::Credentials(format!(
            "{} is read-only",
            self.name()
        ))))
    }

    fn delete(&self) -> Result<()> {
        self.set("")
    }
}

/// Stores the token in the OS keychain.
pub struct KeyringProvider {
    service: String,
    user: String,
}

impl KeyringProvider {
    pub fn new(service: impl Into<String>, user: impl Into<String>) -> Self {
        KeyringProvider {
            service: service.into(),
            user: user.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, &self.user)
            .map_err(|e| anyhow!(StackError::Credentials(format!("keychain unavailable: {e}"))))
    }
}

impl Default for KeyringProvider {
    fn default() -> Self {
        KeyringProvider::new(KEYRING_SERVICE, KEYRING_USER)
    }
}

impl CredentialProvider for KeyringProvider {
    fn name(&self) -> String {
        "OS keychain".to_string()
    }

    fn is_secure(&self) -> bool {
        true
    }

    fn get(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token).filter(|t| !t.is_empty())),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(anyhow!(StackError::Credentials(format!(
                "keychain read failed: {e}"
            )))),
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .map_err(|e| anyhow!(StackError::Credentials(format!("keychain write failed: {e}"))))
    }

    fn delete(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(anyhow!(StackError::Credentials(format!(
                "keychain delete failed: {e}"
            )))),
        }
    }
}

#[derive(Serialize, Deserialize, Default)]
struct CredentialsFile {
    #[serde(default)]
    token: String,
}

/// Stores the token in a plaintext YAML file readable only by the owner.
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: PathBuf) -> Self {
        FileProvider { path }
    }
}

impl CredentialProvider for FileProvider {
    fn name(&self) -> String {
        format!("credentials file ({})", self.path.display())
    }

    fn is_secure(&self) -> bool {
        false
    }

    fn get(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = io::read_file_to_string(&self.path)?;
        let creds: CredentialsFile = serde_yaml::from_str(&content)
            .context("failed to parse credentials file")?;
        Ok(Some(creds.token).filter(|t| !t.is_empty()))
    }

    fn set(&self, token: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(&CredentialsFile {
            token: token.to_string(),
        })
        .context("failed to marshal credentials")?;
        io::write_private_file(&self.path, &yaml).context("failed to write credentials file")
    }

    fn delete(&self) -> Result<()> {
        io::remove_file_if_exists(&self.path).context("failed to delete credentials file")
    }
}

/// A token and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialInfo {
    pub token: String,
    pub source: String,
    pub secure: bool,
}

/// The ordered provider chain.
pub struct CredentialStore {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl CredentialStore {
    /// Env → keychain → file, with the file under `settings.data_dir`.
    pub fn from_settings(settings: &Settings) -> Self {
        CredentialStore::with_providers(vec![
            Box::new(EnvProvider::new(TOKEN_ENV_VAR)),
            Box::new(KeyringProvider::default()),
            Box::new(FileProvider::new(settings.credentials_path())),
        ])
    }

    pub fn with_providers(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        CredentialStore { providers }
    }

    /// Returns the first available token, or `None` if no provider has one.
    pub fn lookup(&self) -> Option<CredentialInfo> {
        self.providers.iter().find_map(|provider| match provider.get() {
            Ok(Some(token)) => Some(CredentialInfo {
                token,
                source: provider.name(),
                secure: provider.is_secure(),
            }),
            Ok(None) => None,
            Err(e) => {
                debug!("Skipping {}: {:#}", provider.name(), e);
                None
            }
        })
    }

    /// Returns the token, or the setup help message when none is configured.
    pub fn token(&self) -> Result<String> {
        self.lookup()
            .map(|info| info.token)
            .ok_or_else(|| anyhow!(StackError::MissingToken))
    }

    /// Stores `token` in the first writable provider that accepts it and
    /// returns that provider's name and security flag.
    pub fn set(&self, token: &str) -> Result<(String, bool)> {
        let mut failures = Vec::new();
        for provider in self.providers.iter().filter(|p| p.is_writable()) {
            match provider.set(token) {
                Ok(()) => {
                    if !provider.is_secure() {
                        warn!("Token stored in plain text at {}", provider.name());
                    }
                    return Ok((provider.name(), provider.is_secure()));
                }
                Err(e) => {
                    debug!("Could not store token in {}: {:#}", provider.name(), e);
                    failures.push(format!("  {}: {:#}", provider.name(), e));
                }
            }
        }
        Err(anyhow!(StackError::Credentials(format!(
            "failed to store token securely:\n{}\n\nFor CI/headless environments, use: export {}=<your_token>",
            failures.join("\n"),
            TOKEN_ENV_VAR
        ))))
    }

    /// Removes the token from every writable provider.
    pub fn delete(&self) -> Result<()> {
        let mut failures = Vec::new();
        let mut attempted = 0;
        for provider in self.providers.iter().filter(|p| p.is_writable()) {
            attempted += 1;
            if let Err(e) = provider.delete() {
                failures.push(format!("{}: {:#}", provider.name(), e));
            }
        }
        if attempted > 0 && failures.len() == attempted {
            return Err(anyhow!(StackError::Credentials(format!(
                "failed to delete token: {}",
                failures.join(", ")
            ))));
        }
        Ok(())
    }
}
