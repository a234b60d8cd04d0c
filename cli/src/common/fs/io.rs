//! # StackToDate Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! This module centralizes the filesystem operations the CLI needs: reading
//! project marker files, writing the manifest and caches, storing the
//! plaintext credentials fallback with owner-only permissions, and checking
//! cache freshness by modification time.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, rejecting paths that exist as files.
//! - **`read_file_to_string`**: `fs::read_to_string` with path context.
//! - **`read_optional`**: Best-effort read used by the detectors; invalid
//!   UTF-8 is replaced, I/O failures yield `None` and a debug trace.
//! - **`write_string_to_file`**: Whole-file overwrite after creating the parent directory.
//! - **`write_private_file`**: Like `write_string_to_file`, but the file is
//!   `0600` and a freshly created parent directory is `0700` (Unix).
//! - **`remove_file_if_exists`**: Deletes a file, treating "not found" as success.
//! - **`modified_within`**: True when a file exists and its mtime is younger than a TTL.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::write_string_to_file(&manifest_path, &yaml)?;
//! if let Some(content) = io::read_optional(&base.join(".ruby-version")) {
//!     // ...
//! }
//! ```
//!
use crate::core::error::{Result, StackError};
use anyhow::Context;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function creates the directory,
/// including any necessary parent directories (similar to `mkdir -p`).
/// If the path already exists but is not a directory, an error
/// (`StackError::FileSystem`) is returned.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(StackError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be found, opened, or read,
/// with context indicating which file failed.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Reads a file if it can be read, otherwise returns `None`.
///
/// Detectors treat absent or unreadable files as "nothing detected", so
/// the error is only traced at debug level. Bytes that are not valid UTF-8
/// become U+FFFD instead of discarding the whole file.
pub fn read_optional(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            debug!("Skipping {:?}: {}", path, e);
            None
        }
    }
}

/// Writes string content to a specified file path, overwriting if it exists.
///
/// The parent directory is created first if necessary.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Writes a file readable only by its owner.
///
/// Used for the plaintext credentials fallback. On Unix the file mode is
/// `0600`, and a parent directory created here gets `0700`.
pub fn write_private_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let created = !parent.exists();
        ensure_dir_exists(parent)?;
        #[cfg(unix)]
        if created {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(parent, fs::Permissions::from_mode(0o700))
                .with_context(|| format!("Failed to restrict permissions on {:?}", parent))?;
        }
        #[cfg(not(unix))]
        let _ = created;
    }

    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Failed to restrict permissions on {:?}", path))?;
    }
    Ok(())
}

/// Removes a file; a file that is already gone counts as success.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!("Removed file: {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to delete file {:?}", path)),
    }
}

/// Returns true when `path` exists and was modified less than `ttl` ago.
///
/// A modification time in the future counts as fresh.
pub fn modified_within(path: &Path, ttl: Duration) -> bool {
    let modified = match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => modified,
        Err(_) => return false,
    };
    match SystemTime::now().duration_since(modified) {
        Ok(age) => age < ttl,
        Err(_) => true,
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    /// Sets a file's mtime to `age` in the past.
    fn backdate(path: &Path, age: Duration) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
    }

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_read_write_string_to_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("nested/test_rw.txt");
        write_string_to_file(&file_path, "uuid: abc")?;
        assert_eq!(read_file_to_string(&file_path)?, "uuid: abc");
        Ok(())
    }

    #[test]
    fn test_read_optional_missing_file_is_none() {
        let base_dir = tempdir().unwrap();
        assert_eq!(read_optional(&base_dir.path().join("go.mod")), None);
    }

    #[test]
    fn test_read_optional_keeps_non_utf8_files() {
        let base_dir = tempdir().unwrap();
        let path = base_dir.path().join("Gemfile");
        fs::write(&path, b"# caf\xe9\ngem 'rails', '7.1.0'\n").unwrap();
        let content = read_optional(&path).unwrap();
        assert!(content.starts_with("# caf\u{FFFD}\n"));
        assert!(content.contains("gem 'rails', '7.1.0'"));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_private_file_permissions() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let base_dir = tempdir()?;
        let dir = base_dir.path().join("data");
        let file_path = dir.join("credentials.yaml");
        write_private_file(&file_path, "token: secret\n")?;
        let file_mode = fs::metadata(&file_path)?.permissions().mode() & 0o777;
        let dir_mode = fs::metadata(&dir)?.permissions().mode() & 0o777;
        assert_eq!(file_mode, 0o600);
        assert_eq!(dir_mode, 0o700);
        Ok(())
    }

    #[test]
    fn test_remove_file_if_exists_tolerates_missing() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("gone.txt");
        remove_file_if_exists(&file_path)?;
        fs::write(&file_path, "x")?;
        remove_file_if_exists(&file_path)?;
        assert!(!file_path.exists());
        Ok(())
    }

    #[test]
    fn test_modified_within_ttl() {
        let base_dir = tempdir().unwrap();
        let file_path = base_dir.path().join("products-cache.json");
        let ttl = Duration::from_secs(24 * 60 * 60);

        assert!(!modified_within(&file_path, ttl)); // Missing file

        fs::write(&file_path, "{}").unwrap();
        backdate(&file_path, Duration::from_secs(60 * 60));
        assert!(modified_within(&file_path, ttl));

        backdate(&file_path, Duration::from_secs(25 * 60 * 60));
        assert!(!modified_within(&file_path, ttl));
    }
}
