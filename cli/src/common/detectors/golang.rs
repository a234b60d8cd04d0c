//! Go version from the `go` directive of `go.mod`.
use super::{first_capture, Candidate};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static GO_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"go\s+(\d+\.\d+(?:\.\d+)?)").expect("valid go.mod regex"));

pub fn detect(base: &Path) -> Vec<Candidate> {
    first_capture(base, "go.mod", &GO_DIRECTIVE).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_go_directive() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("go.mod"),
            "module example.com/app\n\ngo 1.21.5\n\nrequire github.com/spf13/cobra v1.8.0\n",
        )
        .unwrap();
        assert_eq!(detect(dir.path()), vec![Candidate::new("1.21.5", "go.mod")]);
    }

    #[test]
    fn test_go_mod_without_directive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("go.mod"), "module example.com/app\n").unwrap();
        assert!(detect(dir.path()).is_empty());
    }
}
