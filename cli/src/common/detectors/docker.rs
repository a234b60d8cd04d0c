//! # StackToDate Docker Image Detection
//!
//! File: cli/src/common/detectors/docker.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Collects base image references from every `*Dockerfile*` in the base
//! directory (sorted by file name; one candidate per `FROM` line, so
//! multi-stage builds yield several) and from the `image:` keys of
//! `docker-compose.yml`.
//!
//! `classify_image` maps an image onto a language when its repository name
//! is one of the official language images. The name must start the
//! reference or follow a `/`, which keeps `library/golang:1.22` a Go image
//! while `mongo:6` and `django:4` stay unclassified.
//!
use super::{Candidate, Technology};
use crate::common::fs::io;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;
use walkdir::WalkDir;

const COMPOSE_FILE: &str = "docker-compose.yml";

static FROM_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^FROM\s+(.+)").expect("valid FROM regex"));

static COMPOSE_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*image:\s*(.+)").expect("valid image regex"));

/// Image name prefixes per technology, checked in this order.
const IMAGE_PREFIXES: [(Technology, &[&str]); 4] = [
    (Technology::Ruby, &["ruby:"]),
    (Technology::Python, &["python:"]),
    (Technology::Nodejs, &["node:"]),
    (Technology::Go, &["golang:", "go:"]),
];

pub fn detect(base: &Path) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(base)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let file_name = entry.file_name().to_string_lossy().to_string();
        if !file_name.contains("Dockerfile") {
            continue;
        }
        let Some(content) = io::read_optional(entry.path()) else {
            continue;
        };
        for caps in FROM_LINE.captures_iter(&content) {
            if let Some(image) = caps[1].split_whitespace().next() {
                candidates.push(Candidate::new(image, file_name.as_str()));
            }
        }
    }

    if let Some(content) = io::read_optional(&base.join(COMPOSE_FILE)) {
        for caps in COMPOSE_IMAGE.captures_iter(&content) {
            let image = caps[1].trim();
            if !image.is_empty() {
                candidates.push(Candidate::new(image, COMPOSE_FILE));
            }
        }
    }

    debug!("Found {} Docker image references", candidates.len());
    candidates
}

/// Returns the language an image belongs to, if any.
pub fn classify_image(image: &str) -> Option<Technology> {
    IMAGE_PREFIXES
        .iter()
        .find(|(_, prefixes)| prefixes.iter().any(|p| has_segment_prefix(image, p)))
        .map(|(tech, _)| *tech)
}

/// True when `prefix` occurs at the start of `image` or right after a `/`.
fn has_segment_prefix(image: &str, prefix: &str) -> bool {
    image
        .match_indices(prefix)
        .any(|(idx, _)| idx == 0 || image[..idx].ends_with('/'))
}
