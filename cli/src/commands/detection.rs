//! # Shared Detection Flow
//!
//! File: cli/src/commands/detection.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Glue used by `autodetect`, `init`, `update` and `check`: obtaining the
//! catalog for truncation, rendering detected candidates and turning them
//! into a stack (interactively or by taking the first candidate).
//!
use crate::common::catalog::{cache::CatalogCache, truncate::eol_status, Product};
use crate::common::detectors::{DetectedInfo, Technology};
use crate::common::ui;
use crate::core::config::Settings;
use crate::core::error::Result;
use crate::core::manifest::{Stack, StackEntry};
use std::fmt::Write as _;
use std::io::{BufRead, Write};
use tracing::warn;

/// Loads the product catalog, or `None` when neither the network nor a
/// cached snapshot can provide it. Detection then keeps raw versions.
pub async fn load_catalog(settings: &Settings) -> Option<Vec<Product>> {
    let cache = match CatalogCache::from_settings(settings) {
        Ok(cache) => cache,
        Err(e) => {
            warn!("Product catalog unavailable: {:#}", e);
            return None;
        }
    };
    match cache.get().await {
        Ok(products) => Some(products),
        Err(e) => {
            warn!(
                "Product catalog unavailable, versions will not be truncated: {:#}",
                e
            );
            None
        }
    }
}

/// Formats detected candidates per technology, followed by Docker images
/// that matched no technology. EOL status is appended when the catalog
/// knows the cycle.
pub fn render_detected_info(info: &DetectedInfo, products: Option<&[Product]>) -> String {
    if info.is_empty() {
        return "\nNo project files detected in current directory\n".to_string();
    }

    let mut out = String::from("\n=== Detected Project Information ====\n");
    for tech in Technology::ALL {
        let candidates = info.candidates(tech);
        if candidates.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}:", tech.label());
        for candidate in candidates {
            let status = products
                .map(|p| eol_status(p, tech.key(), &candidate.value))
                .unwrap_or_default();
            let _ = writeln!(out, "  - {}{}", candidate, status);
        }
        out.push('\n');
    }

    let unclassified = info.unclassified_docker();
    if !unclassified.is_empty() {
        out.push_str("Docker:\n");
        for candidate in unclassified {
            let _ = writeln!(out, "  - {}", candidate);
        }
        out.push('\n');
    }
    out
}

pub fn print_detected_info(info: &DetectedInfo, products: Option<&[Product]>) {
    print!("{}", render_detected_info(info, products));
}

/// Builds a stack from detected candidates.
///
/// Non-interactive mode takes the first candidate of every technology;
/// otherwise the user picks one (or skips) per technology.
pub fn select_candidates<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    info: &DetectedInfo,
    interactive: bool,
) -> Result<Stack> {
    if !interactive {
        return Ok(info.to_stack());
    }

    let mut stack = Stack::new();
    for tech in Technology::ALL {
        let candidates = info.candidates(tech);
        if candidates.is_empty() {
            continue;
        }
        if let Some(choice) = ui::select_candidate(input, output, tech.key(), candidates)? {
            if !choice.value.is_empty() {
                stack.insert(
                    tech.key().to_string(),
                    StackEntry::new(choice.value, choice.source),
                );
            }
        }
    }
    Ok(stack)
}

/// Prints `tech: version (from: source)` lines with the given indent.
pub fn print_stack(stack: &Stack, indent: &str) {
    for (tech, entry) in stack {
        println!("{}{}: {} (from: {})", indent, tech, entry.version, entry.source);
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::catalog::Release;
    use crate::common::detectors::Candidate;
    use std::io::Cursor;

    fn info() -> DetectedInfo {
        DetectedInfo {
            ruby: vec![
                Candidate::new("3.2", ".ruby-version"),
                Candidate::new("3.1", "Dockerfile"),
            ],
            go: vec![Candidate::new("1.22", "go.mod")],
            docker: vec![
                Candidate::new("ruby:3.1-slim", "Dockerfile"),
                Candidate::new("postgres:15", "docker-compose.yml"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_render_lists_sections_in_order() {
        let rendered = render_detected_info(&info(), None);
        let ruby = rendered.find("Ruby:").unwrap();
        let go = rendered.find("Go:").unwrap();
        let docker = rendered.find("Docker:").unwrap();
        assert!(ruby < go && go < docker);
        assert!(rendered.contains("  - 3.2 (from: .ruby-version)\n"));
        assert!(rendered.contains("  - postgres:15 (from: docker-compose.yml)\n"));
        assert!(!rendered.contains("ruby:3.1-slim"));
    }

    #[test]
    fn test_render_with_eol_status() {
        let products = vec![Product {
            key: "go".into(),
            name: "Go".into(),
            releases: vec![Release {
                release_cycle: "1.22".into(),
                eol: Some("2025-02-11".into()),
                ..Default::default()
            }],
        }];
        let rendered = render_detected_info(&info(), Some(&products));
        assert!(rendered.contains("  - 1.22 (from: go.mod) (EOL: 2025-02-11)"));
    }

    #[test]
    fn test_render_empty() {
        let rendered = render_detected_info(&DetectedInfo::default(), None);
        assert!(rendered.contains("No project files detected"));
    }

    #[test]
    fn test_select_candidates_non_interactive() {
        let mut output = Vec::new();
        let stack =
            select_candidates(&mut Cursor::new(""), &mut output, &info(), false).unwrap();
        assert_eq!(stack["ruby"], StackEntry::new("3.2", ".ruby-version"));
        assert_eq!(stack["go"], StackEntry::new("1.22", "go.mod"));
        assert!(output.is_empty());
    }

    #[test]
    fn test_select_candidates_interactive() {
        // Pick the Dockerfile ruby, skip go.
        let mut input = Cursor::new("2\n0\n");
        let mut output = Vec::new();
        let stack = select_candidates(&mut input, &mut output, &info(), true).unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack["ruby"], StackEntry::new("3.1", "Dockerfile"));
    }
}
