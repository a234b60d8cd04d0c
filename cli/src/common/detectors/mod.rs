//! # StackToDate Technology Detection (`common::detectors`)
//!
//! File: cli/src/common/detectors/mod.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Detection turns the marker files of a project directory into version
//! candidates for each supported technology.
//!
//! ## Architecture
//!
//! 1. **Scan**: one submodule per technology reads its marker files under an
//!    explicit base directory and returns raw `Candidate`s. Missing or
//!    unreadable files simply produce no candidates.
//! 2. **Clean**: every language candidate is reduced to its numeric core
//!    (`~> 7.1.0` → `7.1.0`) by `common::version::clean_version`.
//! 3. **Classify Docker images**: base images such as `ruby:3.2-alpine` are
//!    added as extra candidates of the matching language. Images matching no
//!    language stay in the Docker list and are reported separately.
//! 4. **Truncate**: when a product catalog is available, each version is cut
//!    back to its release cycle (`3.11.4` → `3.11`).
//!
//! The process working directory is never changed; every path is built from
//! the base passed in.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::detectors;
//!
//! let info = detectors::detect_project_info(&project_dir, Some(&products));
//! let stack = info.to_stack(); // first candidate per technology
//! ```
//!
use crate::common::catalog::{truncate::truncate_to_cycle, Product};
use crate::common::fs::io;
use crate::common::version::{clean_version, extract_version_from_docker_image};
use crate::core::manifest::{Stack, StackEntry};
use regex::Regex;
use std::fmt;
use std::path::Path;
use tracing::debug;

pub mod docker;
pub mod golang;
pub mod nodejs;
pub mod python;
pub mod rails;
pub mod ruby;

/// A detected version together with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The detected version (or image reference, for Docker candidates).
    pub value: String,
    /// File name the value was read from, e.g. `.ruby-version`.
    pub source: String,
}

impl Candidate {
    pub fn new(value: impl Into<String>, source: impl Into<String>) -> Self {
        Candidate {
            value: value.into(),
            source: source.into(),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (from: {})", self.value, self.source)
    }
}

/// Technologies tracked in the manifest.
///
/// The key doubles as the manifest stack key and the catalog product key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technology {
    Ruby,
    Rails,
    Nodejs,
    Go,
    Python,
}

impl Technology {
    /// All technologies in display order.
    pub const ALL: [Technology; 5] = [
        Technology::Ruby,
        Technology::Rails,
        Technology::Nodejs,
        Technology::Go,
        Technology::Python,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Technology::Ruby => "ruby",
            Technology::Rails => "rails",
            Technology::Nodejs => "nodejs",
            Technology::Go => "go",
            Technology::Python => "python",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Technology::Ruby => "Ruby",
            Technology::Rails => "Rails",
            Technology::Nodejs => "Node.js",
            Technology::Go => "Go",
            Technology::Python => "Python",
        }
    }
}

/// Everything detected in one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedInfo {
    pub ruby: Vec<Candidate>,
    pub rails: Vec<Candidate>,
    pub nodejs: Vec<Candidate>,
    pub go: Vec<Candidate>,
    pub python: Vec<Candidate>,
    /// Raw Docker image references, classified or not.
    pub docker: Vec<Candidate>,
}

impl DetectedInfo {
    pub fn candidates(&self, tech: Technology) -> &[Candidate] {
        match tech {
            Technology::Ruby => &self.ruby,
            Technology::Rails => &self.rails,
            Technology::Nodejs => &self.nodejs,
            Technology::Go => &self.go,
            Technology::Python => &self.python,
        }
    }

    fn candidates_mut(&mut self, tech: Technology) -> &mut Vec<Candidate> {
        match tech {
            Technology::Ruby => &mut self.ruby,
            Technology::Rails => &mut self.rails,
            Technology::Nodejs => &mut self.nodejs,
            Technology::Go => &mut self.go,
            Technology::Python => &mut self.python,
        }
    }

    /// True when no marker file produced anything.
    pub fn is_empty(&self) -> bool {
        self.docker.is_empty() && Technology::ALL.iter().all(|t| self.candidates(*t).is_empty())
    }

    /// Docker images that did not map onto any technology.
    pub fn unclassified_docker(&self) -> Vec<&Candidate> {
        self.docker
            .iter()
            .filter(|c| docker::classify_image(&c.value).is_none())
            .collect()
    }

    /// Builds a stack from the first candidate of every technology.
    pub fn to_stack(&self) -> Stack {
        Technology::ALL
            .iter()
            .filter_map(|tech| {
                self.candidates(*tech).first().map(|c| {
                    (
                        tech.key().to_string(),
                        StackEntry::new(c.value.clone(), c.source.clone()),
                    )
                })
            })
            .collect()
    }
}

/// Runs every scanner under `base` without any post-processing.
pub fn scan(base: &Path) -> DetectedInfo {
    debug!("Scanning {} for project files", base.display());
    DetectedInfo {
        ruby: ruby::detect(base),
        rails: rails::detect(base),
        nodejs: nodejs::detect(base),
        go: golang::detect(base),
        python: python::detect(base),
        docker: docker::detect(base),
    }
}

/// Detects, cleans, classifies and (when `products` is given) truncates
/// every candidate found under `base`.
pub fn detect_project_info(base: &Path, products: Option<&[Product]>) -> DetectedInfo {
    let mut info = scan(base);

    for tech in Technology::ALL {
        for candidate in info.candidates_mut(tech).iter_mut() {
            candidate.value = clean_version(&candidate.value);
        }
    }

    let docker_candidates = info.docker.clone();
    for image in docker_candidates {
        if let Some(tech) = docker::classify_image(&image.value) {
            let version = extract_version_from_docker_image(&image.value);
            debug!("Docker image {} counts as {} {}", image.value, tech.key(), version);
            info.candidates_mut(tech)
                .push(Candidate::new(version, image.source));
        }
    }

    if let Some(products) = products {
        for tech in Technology::ALL {
            for candidate in info.candidates_mut(tech).iter_mut() {
                candidate.value = truncate_to_cycle(products, tech.key(), &candidate.value);
            }
        }
    }

    info
}

// --- Helpers shared by the scanners ---

/// Reads `base/name` and returns its trimmed content when non-empty.
pub(crate) fn trimmed_file(base: &Path, name: &str) -> Option<Candidate> {
    let content = io::read_optional(&base.join(name))?;
    let value = content.trim();
    if value.is_empty() {
        debug!("{} is empty", name);
        return None;
    }
    Some(Candidate::new(value, name))
}

/// Reads `base/name` and returns the first capture group of `pattern`.
pub(crate) fn first_capture(base: &Path, name: &str, pattern: &Regex) -> Option<Candidate> {
    let content = io::read_optional(&base.join(name))?;
    match pattern.captures(&content).and_then(|caps| caps.get(1)) {
        Some(m) => Some(Candidate::new(m.as_str(), name)),
        None => {
            debug!("No version found in {}", name);
            None
        }
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::catalog::Release;
    use std::fs;
    use tempfile::tempdir;

    fn product(key: &str, cycles: &[&str]) -> Product {
        Product {
            key: key.to_string(),
            name: key.to_string(),
            releases: cycles
                .iter()
                .map(|c| Release {
                    release_cycle: c.to_string(),
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_directory_detects_nothing() {
        let dir = tempdir().unwrap();
        let info = detect_project_info(dir.path(), None);
        assert!(info.is_empty());
        assert!(info.to_stack().is_empty());
    }

    #[test]
    fn test_detection_cleans_versions() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Gemfile"), "gem 'rails', '~> 7.1.0'\n").unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"engines": {"node": ">= 18.0.0"}}"#,
        )
        .unwrap();

        let info = detect_project_info(dir.path(), None);

        assert_eq!(info.rails, vec![Candidate::new("7.1.0", "Gemfile")]);
        assert_eq!(info.nodejs, vec![Candidate::new("18.0.0", "package.json")]);
    }

    #[test]
    fn test_docker_images_join_language_candidates() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".ruby-version"), "3.2.2\n").unwrap();
        fs::write(dir.path().join("Dockerfile"), "FROM ruby:3.2.0-alpine\n").unwrap();
        fs::write(
            dir.path().join("docker-compose.yml"),
            "services:\n  db:\n    image: postgres:15\n  cache:\n    image: mongo:6\n",
        )
        .unwrap();

        let info = detect_project_info(dir.path(), None);

        assert_eq!(
            info.ruby,
            vec![
                Candidate::new("3.2.2", ".ruby-version"),
                Candidate::new("3.2.0", "Dockerfile"),
            ]
        );
        assert!(info.go.is_empty());
        let unclassified: Vec<&str> = info
            .unclassified_docker()
            .iter()
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(unclassified, vec!["postgres:15", "mongo:6"]);
        assert_eq!(info.docker.len(), 3);
    }

    #[test]
    fn test_detection_truncates_with_catalog() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".python-version"), "3.11.4").unwrap();
        fs::write(dir.path().join(".nvmrc"), "v20.10.0").unwrap();
        let products = vec![product("python", &["3.11", "3.12"]), product("nodejs", &["20"])];

        let info = detect_project_info(dir.path(), Some(&products));

        assert_eq!(info.python[0].value, "3.11");
        // `v20.10.0` has no numeric prefix, so it is left alone.
        assert_eq!(info.nodejs[0].value, "v20.10.0");
    }

    #[test]
    fn test_to_stack_takes_first_candidate() {
        let info = DetectedInfo {
            python: vec![
                Candidate::new("3.12", ".python-version"),
                Candidate::new("3.11", "pyproject.toml"),
            ],
            go: vec![Candidate::new("1.22", "go.mod")],
            ..Default::default()
        };

        let stack = info.to_stack();

        assert_eq!(stack.len(), 2);
        assert_eq!(stack["python"], StackEntry::new("3.12", ".python-version"));
        assert_eq!(stack["go"], StackEntry::new("1.22", "go.mod"));
    }

    #[test]
    fn test_candidate_display() {
        assert_eq!(
            Candidate::new("3.2", ".ruby-version").to_string(),
            "3.2 (from: .ruby-version)"
        );
    }
}
