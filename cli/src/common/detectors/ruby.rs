//! Ruby version from `.ruby-version`.
use super::{trimmed_file, Candidate};
use std::path::Path;

pub fn detect(base: &Path) -> Vec<Candidate> {
    trimmed_file(base, ".ruby-version").into_iter().collect()
}
