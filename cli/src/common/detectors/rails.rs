//! Rails version from the `gem "rails", "<req>"` line of a `Gemfile`.
use super::{first_capture, Candidate};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static GEMFILE_RAILS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"gem ['"]rails['"],\s*['"]([^'"]+)['"]"#).expect("valid Gemfile regex")
});

pub fn detect(base: &Path) -> Vec<Candidate> {
    first_capture(base, "Gemfile", &GEMFILE_RAILS)
        .into_iter()
        .collect()
}
