//! Node.js version from `package.json` (`"node": "<req>"`) and `.nvmrc`.
use super::{first_capture, trimmed_file, Candidate};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static PACKAGE_NODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""node"\s*:\s*"([^"]+)""#).expect("valid package.json regex"));

pub fn detect(base: &Path) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    candidates.extend(first_capture(base, "package.json", &PACKAGE_NODE));
    candidates.extend(trimmed_file(base, ".nvmrc"));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_package_json_before_nvmrc() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            "{\n  \"name\": \"web\",\n  \"engines\": {\n    \"node\" : \">=18.0.0\"\n  }\n}\n",
        )
        .unwrap();
        fs::write(dir.path().join(".nvmrc"), "20.10.0\n").unwrap();

        assert_eq!(
            detect(dir.path()),
            vec![
                Candidate::new(">=18.0.0", "package.json"),
                Candidate::new("20.10.0", ".nvmrc"),
            ]
        );
    }

    #[test]
    fn test_package_json_without_engines() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "web"}"#).unwrap();
        assert!(detect(dir.path()).is_empty());
    }
}
