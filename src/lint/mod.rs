//! External linter invocation and output parsing.
//!
//! The runner shells out to the configured linter (pylint by default) once
//! per file and parses its text output into [`Finding`] records at this
//! boundary; nothing downstream sees raw linter text.

use crate::core::errors::{ChurnError, Result};
use crate::core::Finding;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Everything one linter run produced for one file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LintOutput {
    pub findings: Vec<Finding>,
    /// The linter's summary line ("Your code has been rated at ..."),
    /// verbatim.
    pub rating: Option<String>,
    /// Lines that looked like findings but did not match the expected
    /// shape.
    pub dropped: usize,
}

/// Spawns the configured linter command.
pub struct LintRunner {
    command: String,
    args: Vec<String>,
}

impl LintRunner {
    pub fn new(command: String, args: Vec<String>) -> Self {
        Self { command, args }
    }

    /// Locates the linter binary on PATH before any file is linted, so a
    /// missing tool is reported once instead of per file.
    pub fn probe(&self) -> Result<PathBuf> {
        which::which(&self.command).map_err(|err| ChurnError::LintUnavailable {
            command: self.command.clone(),
            reason: err.to_string(),
        })
    }

    /// Lints one file and parses the output.
    ///
    /// The exit status is deliberately ignored: pylint exits non-zero
    /// whenever it has findings. Only a spawn failure is an error.
    pub fn run(&self, file: &Path) -> Result<LintOutput> {
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(file)
            .output()
            .map_err(|source| ChurnError::Lint {
                command: self.command.clone(),
                path: file.to_path_buf(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_lint_output(&stdout))
    }
}

/// Parses pylint-shaped text output.
///
/// Accepted finding shapes are `path:line: CODE: message` and
/// `path:line:col: CODE: message`. Module headers, separators and blank
/// lines are skipped silently; the rating summary is captured verbatim;
/// anything else is counted as dropped.
pub fn parse_lint_output(stdout: &str) -> LintOutput {
    let finding_re =
        Regex::new(r"^(?P<path>[^:\s][^:]*):(?P<line>-?\d+):(?:-?\d+:)?\s*(?P<code>[A-Z]\d{4}):\s*(?P<message>.+?)\s*$")
            .unwrap();

    let mut output = LintOutput::default();

    for line in stdout.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('*') || trimmed.starts_with('-') {
            continue;
        }
        if trimmed.contains("Your code has been rated") {
            output.rating = Some(trimmed.to_string());
            continue;
        }

        match finding_re.captures(trimmed) {
            Some(caps) => output.findings.push(Finding {
                path: caps["path"].to_string(),
                line: parse_line_number(&caps["line"]),
                code: caps["code"].to_string(),
                message: caps["message"].to_string(),
            }),
            None => {
                log::debug!("dropping unparseable linter line: {trimmed}");
                output.dropped += 1;
            }
        }
    }

    output
}

/// Positive 1-based line number, or `None` when the reported value is zero
/// or negative.
fn parse_line_number(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|n| *n >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parses_typical_pylint_output() {
        let stdout = indoc! {"
            ************* Module sample
            sample.py:1:0: C0114: Missing module docstring (missing-module-docstring)
            sample.py:3:4: C0103: Variable name \"X\" doesn't conform to snake_case naming style (invalid-name)
            sample.py:7:0: W0611: Unused import os (unused-import)

            ------------------------------------------------------------------
            Your code has been rated at 6.67/10 (previous run: 6.67/10, +0.00)
        "};

        let output = parse_lint_output(stdout);

        assert_eq!(output.findings.len(), 3);
        assert_eq!(output.dropped, 0);
        assert_eq!(output.findings[0].code, "C0114");
        assert_eq!(output.findings[0].line, Some(1));
        assert_eq!(output.findings[2].code, "W0611");
        assert_eq!(output.findings[2].path, "sample.py");
        assert_eq!(
            output.rating.as_deref(),
            Some("Your code has been rated at 6.67/10 (previous run: 6.67/10, +0.00)")
        );
    }

    #[test]
    fn accepts_findings_without_a_column() {
        let output = parse_lint_output("pkg/mod.py:12: W0702: No exception type specified\n");

        assert_eq!(output.findings.len(), 1);
        assert_eq!(output.findings[0].line, Some(12));
        assert_eq!(output.findings[0].message, "No exception type specified");
    }

    #[test]
    fn nonpositive_line_numbers_keep_the_finding_without_a_line() {
        let stdout = "f.py:0: C0103: zero line\nf.py:-1:0: C0103: negative line\n";
        let output = parse_lint_output(stdout);

        assert_eq!(output.findings.len(), 2);
        assert_eq!(output.findings[0].line, None);
        assert_eq!(output.findings[1].line, None);
        assert_eq!(output.dropped, 0);
    }

    #[test]
    fn junk_lines_are_counted_not_fatal() {
        let stdout = indoc! {"
            this is not a finding at all
            f.py:3:1: C0103: real finding
            also:not:quite right
        "};

        let output = parse_lint_output(stdout);

        assert_eq!(output.findings.len(), 1);
        assert_eq!(output.dropped, 2);
    }

    #[test]
    fn empty_output_parses_to_nothing() {
        let output = parse_lint_output("");
        assert_eq!(output, LintOutput::default());
    }

    #[test]
    fn probe_fails_for_missing_binaries() {
        let runner = LintRunner::new("churnscope-no-such-linter".to_string(), vec![]);
        let err = runner.probe().unwrap_err();
        assert!(err.to_string().contains("churnscope-no-such-linter"));
    }

    #[test]
    fn probe_finds_binaries_on_path() {
        // git is required by the rest of the test suite anyway.
        let runner = LintRunner::new("git".to_string(), vec![]);
        assert!(runner.probe().is_ok());
    }

    #[test]
    fn run_captures_stdout_of_the_spawned_command() {
        let runner = LintRunner::new(
            "echo".to_string(),
            vec!["sample.py:3: C0103: bad name for".to_string()],
        );
        let output = runner.run(Path::new("file.py")).unwrap();

        assert_eq!(output.findings.len(), 1);
        assert_eq!(output.findings[0].code, "C0103");
        assert_eq!(output.findings[0].message, "bad name for file.py");
    }

    #[test]
    fn run_fails_when_the_command_cannot_spawn() {
        let runner = LintRunner::new("churnscope-no-such-linter".to_string(), vec![]);
        assert!(runner.run(Path::new("file.py")).is_err());
    }
}
