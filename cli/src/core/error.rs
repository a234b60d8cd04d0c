//! # StackToDate Error Types
//!
//! File: cli/src/core/error.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! This module defines the error types used throughout the stacktodate CLI.
//! Detection itself never fails (scanners degrade to "no candidates"), so the
//! errors here describe the operations that *can* abort a command: reading
//! the manifest, loading caches, talking to the stacktodate API and managing
//! credentials.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `StackError`: A custom error enum using `thiserror` for specific error kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` used by command handlers
//!
//! The API variants carry user-facing, actionable messages: authentication and
//! not-found errors tell the user what to do next, validation errors surface
//! the server's own message.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if manifest.uuid.is_empty() {
//!     return Err(StackError::Manifest("uuid not found in config file".into()))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the stacktodate CLI.
#[derive(Error, Debug)]
pub enum StackError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("authentication failed: invalid or expired token\n\nPlease update your token with: stacktodate global-config set")]
    Unauthorized,

    #[error("project not found: UUID does not exist\n\nPlease check the UUID or create a new project")]
    ProjectNotFound,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("StackToDate API is experiencing issues (status {status})\n\nPlease try again later")]
    ServerError { status: u16 },

    #[error("API error (status {status}): {body}")]
    ApiStatus { status: u16, body: String },

    #[error("API error: {0}")]
    ApiResponse(String),

    #[error("failed to connect to StackToDate API: {source}\n\nPlease check your internet connection and try again")]
    Connection {
        #[from]
        source: reqwest::Error,
    },

    #[error("no authentication token found\n\nSetup your token with one of these methods:\n  1. Interactive setup: stacktodate global-config set\n  2. Environment variable: export STD_TOKEN=<your_token>\n\nFor more help: stacktodate global-config --help")]
    MissingToken,

    #[error("Credential storage error: {0}")]
    Credentials(String),

    #[error("Input error: {0}")]
    Prompt(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = StackError::Config("api_url must start with http".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: api_url must start with http"
        );

        let validation = StackError::Validation("name can't be blank".into());
        assert_eq!(validation.to_string(), "validation error: name can't be blank");

        let status = StackError::ApiStatus {
            status: 418,
            body: "teapot".into(),
        };
        assert_eq!(status.to_string(), "API error (status 418): teapot");
    }

    #[test]
    fn test_auth_errors_point_to_next_step() {
        assert!(StackError::Unauthorized
            .to_string()
            .contains("stacktodate global-config set"));
        assert!(StackError::MissingToken.to_string().contains("STD_TOKEN"));
        assert!(StackError::ServerError { status: 503 }
            .to_string()
            .contains("status 503"));
    }
}
