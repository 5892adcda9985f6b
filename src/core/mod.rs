pub mod classify;
pub mod errors;
pub mod issues;
pub mod ratio;
pub mod similarity;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One historical snapshot of a file, newest-first within a sequence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Revision {
    /// Position in the sampled sequence; 0 is the most recent revision.
    pub position: usize,
    /// Abbreviated commit id, kept for log messages.
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Full file content at this revision, or `None` when the blob could
    /// not be read (file absent, non-utf8, lookup failure).
    pub content: Option<String>,
}

impl Revision {
    pub fn new(
        position: usize,
        id: String,
        timestamp: DateTime<Utc>,
        content: Option<String>,
    ) -> Self {
        Self {
            position,
            id,
            timestamp,
            content,
        }
    }
}

/// Aggregate rewrite intensity for one file across its sampled history.
///
/// `samples` counts the revision transitions that contributed to `value`.
/// `value` is `None` until at least one transition was usable; a measured
/// value of 0.0 is distinct from "no measurement".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefactoringRatio {
    pub samples: usize,
    pub value: Option<f64>,
}

impl RefactoringRatio {
    pub fn measured(samples: usize, value: f64) -> Self {
        Self {
            samples,
            value: Some(value),
        }
    }

    /// The single "no result" form: zero samples, no value.
    pub fn insufficient() -> Self {
        Self {
            samples: 0,
            value: None,
        }
    }

    pub fn is_measured(&self) -> bool {
        self.samples > 0 && self.value.is_some()
    }
}

/// Qualitative classification of a refactoring ratio.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SignalBand {
    Unknown,
    None,
    Low,
    Moderate,
    High,
}

impl SignalBand {
    /// Guidance text reported alongside the band.
    pub fn recommendation(&self) -> &'static str {
        static RECOMMENDATIONS: &[(SignalBand, &str)] = &[
            (SignalBand::Unknown, "not enough history to assess"),
            (SignalBand::None, "no refactoring activity detected"),
            (
                SignalBand::Low,
                "review periodically to maintain code quality",
            ),
            (
                SignalBand::Moderate,
                "ensure refactoring stays targeted at reducing debt",
            ),
            (
                SignalBand::High,
                "evaluate churn impact; consider stabilizing",
            ),
        ];

        RECOMMENDATIONS
            .iter()
            .find(|(band, _)| band == self)
            .map(|(_, text)| *text)
            .unwrap_or("not enough history to assess")
    }
}

impl std::fmt::Display for SignalBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(SignalBand, &str)] = &[
            (SignalBand::Unknown, "unknown"),
            (SignalBand::None, "none"),
            (SignalBand::Low, "low"),
            (SignalBand::Moderate, "moderate"),
            (SignalBand::High, "high"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(band, _)| band == self)
            .map(|(_, s)| *s)
            .unwrap_or("unknown");

        write!(f, "{display_str}")
    }
}

/// One static-analysis finding, already parsed out of raw linter output.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub path: String,
    /// 1-based line number; `None` when the reported value was not a
    /// positive integer.
    pub line: Option<u32>,
    pub code: String,
    pub message: String,
}

/// Findings folded by issue code, in first-seen code order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueGroup {
    pub code: String,
    /// Message of the first finding seen for this code.
    pub message: String,
    pub recommendation: String,
    pub locations: Vec<IssueLocation>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueLocation {
    pub path: String,
    pub line: u32,
    /// Trimmed source line at `line`, when the working-tree file was
    /// readable and long enough.
    pub snippet: Option<String>,
}

/// Revision-sampling limit for history walks.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryWindow {
    /// At most this many commits touching the file, newest-first.
    Commits(usize),
    /// Only commits within the trailing N days.
    Days(u32),
}

impl std::fmt::Display for HistoryWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryWindow::Commits(n) => write!(f, "last {n} commits"),
            HistoryWindow::Days(n) => write!(f, "last {n} days"),
        }
    }
}

/// Full analysis output handed to a report writer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Target as given on the command line (path or URL).
    pub target: String,
    pub repo_root: std::path::PathBuf,
    pub generated_at: DateTime<Utc>,
    pub window: HistoryWindow,
    pub files: Vec<FileReport>,
}

/// Per-file terminal status: every analyzed file gets exactly one row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileReport {
    /// Repo-relative path with `/` separators.
    pub path: String,
    /// Number of revisions sampled from history.
    pub revisions: usize,
    pub ratio: RefactoringRatio,
    pub band: SignalBand,
    /// Guidance text for the band, carried so every writer (including
    /// serialized formats) emits it next to the band.
    pub recommendation: String,
    pub issues: Vec<IssueGroup>,
    /// Linter summary line ("Your code has been rated at ..."), verbatim.
    pub rating: Option<String>,
    /// Linter output lines that looked like findings but failed to parse.
    pub dropped_findings: usize,
}

impl FileReport {
    pub fn issue_count(&self) -> usize {
        self.issues.iter().map(|g| g.locations.len()).sum()
    }
}
