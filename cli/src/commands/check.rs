//! # Check Command (`stacktodate check`)
//!
//! File: cli/src/commands/check.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Verifies that the versions recorded in the manifest still match what is
//! detected in the manifest's directory. Intended for CI:
//!
//! | Exit code | Meaning |
//! |---|---|
//! | 0 | every manifest entry matches |
//! | 1 | at least one mismatch or missing technology |
//! | 2 | the check could not run (unreadable manifest, bad path, ...) |
//!
//! ## Comparison
//!
//! For each manifest entry: detected with the same version → *matched*;
//! detected with another version → *mismatched*; not detected →
//! *missing_config*. Technologies detected but absent from the manifest are
//! ignored. Versions are compared as exact strings.
//!
use super::detection;
use crate::common::detectors;
use crate::core::config::Settings;
use crate::core::error::Result;
use crate::core::manifest::{manifest_dir, Manifest, Stack};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the manifest (default: stacktodate.yml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Match,
    Mismatch,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub matches: usize,
    pub mismatches: usize,
    pub missing_config: usize,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResults {
    pub matched: Vec<ComparisonEntry>,
    pub mismatched: Vec<ComparisonEntry>,
    pub missing_config: Vec<ComparisonEntry>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonEntry {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detected: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub summary: CheckSummary,
    pub results: CheckResults,
}

/// Compares the manifest stack against the detected stack.
pub fn compare_stacks(config: &Stack, detected: &Stack) -> CheckResult {
    let mut results = CheckResults::default();

    for (tech, wanted) in config {
        match detected.get(tech) {
            Some(found) => {
                let entry = ComparisonEntry {
                    name: tech.clone(),
                    version: wanted.version.clone(),
                    detected: found.version.clone(),
                    source: found.source.clone(),
                };
                if wanted.version == found.version {
                    results.matched.push(entry);
                } else {
                    results.mismatched.push(entry);
                }
            }
            None => results.missing_config.push(ComparisonEntry {
                name: tech.clone(),
                version: wanted.version.clone(),
                detected: String::new(),
                source: wanted.source.clone(),
            }),
        }
    }

    let summary = CheckSummary {
        matches: results.matched.len(),
        mismatches: results.mismatched.len(),
        missing_config: results.missing_config.len(),
    };
    let status = if summary.mismatches == 0 && summary.missing_config == 0 {
        CheckStatus::Match
    } else {
        CheckStatus::Mismatch
    };

    CheckResult {
        status,
        summary,
        results,
    }
}

/// Runs the check and returns its status; `main` turns it into the exit code.
pub async fn handle_check(args: CheckArgs, settings: &Settings) -> Result<CheckStatus> {
    let config_path = settings.manifest_path(args.config.as_deref());
    let manifest = Manifest::load(&config_path)?;
    let dir = manifest_dir(&config_path)?;
    info!("Checking {} against {}", config_path.display(), dir.display());

    let products = detection::load_catalog(settings).await;
    let detected = detectors::detect_project_info(&dir, products.as_deref()).to_stack();
    let result = compare_stacks(&manifest.stack, &detected);

    match args.format {
        OutputFormat::Json => println!("{}", render_json(&result)?),
        OutputFormat::Text => print!("{}", render_text(&result)),
    }
    Ok(result.status)
}

pub fn render_json(result: &CheckResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Error marshaling JSON")
}

pub fn render_text(result: &CheckResult) -> String {
    let mut out = String::from("Technology Check Results\n========================\n\n");
    let r = &result.results;

    if !r.matched.is_empty() {
        out += &format!("MATCH ({}):\n", r.matched.len());
        for e in &r.matched {
            out += &format!("  {:<12} {} == {}   ✓\n", format!("{}:", e.name), e.version, e.detected);
        }
        out.push('\n');
    }
    if !r.mismatched.is_empty() {
        out += &format!("MISMATCH ({}):\n", r.mismatched.len());
        for e in &r.mismatched {
            out += &format!(
                "  {:<12} {} != {}   (config has {})\n",
                format!("{}:", e.name),
                e.detected,
                e.version,
                e.version
            );
        }
        out.push('\n');
    }
    if !r.missing_config.is_empty() {
        out += &format!("MISSING FROM DETECTION ({}):\n", r.missing_config.len());
        for e in &r.missing_config {
            out += &format!(
                "  {:<12} {}   (in config but not detected)\n",
                format!("{}:", e.name),
                e.version
            );
        }
        out.push('\n');
    }

    out += &format!(
        "Summary: {} match, {} mismatch, {} missing\n",
        result.summary.matches, result.summary.mismatches, result.summary.missing_config
    );
    out += match result.status {
        CheckStatus::Mismatch => "Exit code: 1 (has differences)\n",
        CheckStatus::Match => "Exit code: 0 (all match)\n",
    };
    out
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::StackEntry;

    fn stack(entries: &[(&str, &str, &str)]) -> Stack {
        entries
            .iter()
            .map(|(tech, version, source)| (tech.to_string(), StackEntry::new(*version, *source)))
            .collect()
    }

    #[test]
    fn test_all_match() {
        let config = stack(&[("ruby", "3.2.0", ".ruby-version"), ("nodejs", "18.0.0", ".nvmrc")]);
        let result = compare_stacks(&config, &config.clone());
        assert_eq!(result.status, CheckStatus::Match);
        assert_eq!(result.summary.matches, 2);
    }

    #[test]
    fn test_missing_detection_is_mismatch() {
        let config = stack(&[("ruby", "3.2.0", ".ruby-version"), ("rails", "7.1.0", "Gemfile")]);
        let detected = stack(&[("ruby", "3.2.0", ".ruby-version")]);

        let result = compare_stacks(&config, &detected);

        assert_eq!(result.status, CheckStatus::Mismatch);
        assert_eq!(
            result.summary,
            CheckSummary {
                matches: 1,
                mismatches: 0,
                missing_config: 1
            }
        );
        assert_eq!(result.results.missing_config[0].name, "rails");
        assert_eq!(result.results.missing_config[0].source, "Gemfile");
    }

    #[test]
    fn test_version_mismatch() {
        let config = stack(&[("python", "3.11", ".python-version")]);
        let detected = stack(&[("python", "3.12", ".python-version")]);
        let result = compare_stacks(&config, &detected);
        assert_eq!(result.summary.mismatches, 1);
        assert_eq!(result.results.mismatched[0].detected, "3.12");
    }

    #[test]
    fn test_detected_only_technologies_are_ignored() {
        let config = stack(&[]);
        let detected = stack(&[("go", "1.22", "go.mod")]);
        let result = compare_stacks(&config, &detected);
        assert_eq!(result.status, CheckStatus::Match);
        assert_eq!(result.summary, CheckSummary::default());
    }

    #[test]
    fn test_empty_stacks_match() {
        let result = compare_stacks(&Stack::new(), &Stack::new());
        assert_eq!(result.status, CheckStatus::Match);
        assert_eq!(result.summary, CheckSummary::default());
    }

    #[test]
    fn test_json_shape() {
        let config = stack(&[("ruby", "3.2.0", ".ruby-version"), ("rails", "7.1.0", "Gemfile")]);
        let detected = stack(&[("ruby", "3.2.0", ".ruby-version")]);
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&compare_stacks(&config, &detected)).unwrap())
                .unwrap();

        assert_eq!(json["status"], "mismatch");
        assert_eq!(json["summary"]["matches"], 1);
        assert_eq!(json["summary"]["missing_config"], 1);
        assert_eq!(json["results"]["mismatched"], serde_json::json!([]));
        assert_eq!(
            json["results"]["missing_config"][0],
            serde_json::json!({"name": "rails", "version": "7.1.0", "source": "Gemfile"})
        );
    }

    #[test]
    fn test_text_output() {
        let config = stack(&[("ruby", "3.2.0", ".ruby-version"), ("go", "1.21", "go.mod")]);
        let detected = stack(&[("ruby", "3.3.0", ".ruby-version"), ("go", "1.21", "go.mod")]);
        let text = render_text(&compare_stacks(&config, &detected));

        assert!(text.contains("MATCH (1):\n  go:          1.21 == 1.21   ✓\n"));
        assert!(text.contains("MISMATCH (1):\n  ruby:        3.3.0 != 3.2.0   (config has 3.2.0)\n"));
        assert!(text.contains("Summary: 1 match, 1 mismatch, 0 missing"));
        assert!(text.ends_with("Exit code: 1 (has differences)\n"));
    }

    #[test]
    fn test_check_args_format() {
        let args = CheckArgs::try_parse_from(["check", "--format", "json", "-c", "x.yml"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.config, Some(PathBuf::from("x.yml")));
        assert!(CheckArgs::try_parse_from(["check", "--format", "xml"]).is_err());
    }
}
