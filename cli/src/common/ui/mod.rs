//! # StackToDate User Interaction Utilities (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Terminal prompts used by `init`, `update` and `global-config`.
//!
//! Every line-based prompt is generic over `BufRead`/`Write` so commands pass
//! `stdin().lock()`/`stdout()` while tests pass in-memory buffers. End of
//! input is treated as an empty answer, so piping `/dev/null` into a prompt
//! skips it instead of looping.
//!
//! The token prompt reads without echo through `rpassword`.
//!
use crate::common::detectors::Candidate;
use crate::core::error::{Result, StackError};
use anyhow::{anyhow, Context};
use std::io::{BufRead, Write};

/// Reads one line and trims it. EOF yields an empty string.
pub fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| anyhow!(StackError::Prompt(format!("failed to read input: {e}"))))?;
    Ok(line.trim().to_string())
}

/// Prints `label` (no newline) and reads the answer.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{}", label)?;
    output.flush()?;
    read_line(input)
}

/// Asks for explicit confirmation; only the exact `word` counts as yes.
pub fn confirm_word<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    word: &str,
) -> Result<bool> {
    let answer = prompt(input, output, &format!("{} (type '{}' to confirm): ", question, word))?;
    Ok(answer == word)
}

/// Lets the user pick one candidate for `tech`, or skip with `0`/Enter.
///
/// Invalid answers re-prompt; end of input counts as skip.
pub fn select_candidate<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    tech: &str,
    candidates: &[Candidate],
) -> Result<Option<Candidate>> {
    writeln!(output, "\nSelect {} version (or press Enter to skip):", tech)?;
    for (i, candidate) in candidates.iter().enumerate() {
        writeln!(output, "  {}) {}", i + 1, candidate)?;
    }
    writeln!(output, "  0) Skip")?;

    loop {
        write!(output, "Your choice: ")?;
        output.flush()?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(|e| anyhow!(StackError::Prompt(format!("failed to read input: {e}"))))?;
        let choice = line.trim();
        if read == 0 || choice.is_empty() || choice == "0" {
            return Ok(None);
        }

        match choice.parse::<usize>() {
            Ok(idx) if (1..=candidates.len()).contains(&idx) => {
                return Ok(Some(candidates[idx - 1].clone()))
            }
            _ => writeln!(output, "Invalid choice. Please try again.")?,
        }
    }
}

/// Reads a secret from the terminal without echoing it.
pub fn prompt_hidden(label: &str) -> Result<String> {
    let value = rpassword::prompt_password(label).context("failed to read token")?;
    Ok(value.trim().to_string())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate::new("3.2", ".ruby-version"),
            Candidate::new("3.1", "Dockerfile"),
        ]
    }

    #[test]
    fn test_select_candidate_by_number() {
        let mut input = Cursor::new("2\n");
        let mut output = Vec::new();
        let choice = select_candidate(&mut input, &mut output, "ruby", &candidates()).unwrap();
        assert_eq!(choice, Some(Candidate::new("3.1", "Dockerfile")));

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Select ruby version"));
        assert!(shown.contains("  1) 3.2 (from: .ruby-version)"));
        assert!(shown.contains("  0) Skip"));
    }

    #[test]
    fn test_select_candidate_reprompts_on_invalid() {
        let mut input = Cursor::new("9\nabc\n1\n");
        let mut output = Vec::new();
        let choice = select_candidate(&mut input, &mut output, "ruby", &candidates()).unwrap();
        assert_eq!(choice.unwrap().value, "3.2");
        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("Invalid choice").count(), 2);
    }

    #[test]
    fn test_select_candidate_skip() {
        for answer in ["0\n", "\n", ""] {
            let mut input = Cursor::new(answer);
            let mut output = Vec::new();
            let choice = select_candidate(&mut input, &mut output, "ruby", &candidates()).unwrap();
            assert_eq!(choice, None, "answer: {answer:?}");
        }
    }

    #[test]
    fn test_confirm_word() {
        let mut output = Vec::new();
        assert!(confirm_word(&mut Cursor::new("yes\n"), &mut output, "Delete?", "yes").unwrap());
        assert!(!confirm_word(&mut Cursor::new("y\n"), &mut output, "Delete?", "yes").unwrap());
        assert!(!confirm_word(&mut Cursor::new(""), &mut output, "Delete?", "yes").unwrap());
    }

    #[test]
    fn test_prompt_trims_answer() {
        let mut output = Vec::new();
        let answer = prompt(&mut Cursor::new("  my-app \n"), &mut output, "Enter name: ").unwrap();
        assert_eq!(answer, "my-app");
        assert_eq!(String::from_utf8(output).unwrap(), "Enter name: ");
    }
}
