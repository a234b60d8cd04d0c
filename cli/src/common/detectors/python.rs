//! Python version from `.python-version`, `pyproject.toml` and `Pipfile`.
use super::{first_capture, trimmed_file, Candidate};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static PYPROJECT_PYTHON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"python\s*=\s*"([^"]+)""#).expect("valid pyproject regex"));

static PIPFILE_PYTHON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"python_version\s*=\s*"([^"]+)""#).expect("valid Pipfile regex")
});

pub fn detect(base: &Path) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    candidates.extend(trimmed_file(base, ".python-version"));
    candidates.extend(first_capture(base, "pyproject.toml", &PYPROJECT_PYTHON));
    candidates.extend(first_capture(base, "Pipfile", &PIPFILE_PYTHON));
    candidates
}
