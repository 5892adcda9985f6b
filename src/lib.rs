// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod history;
pub mod io;
pub mod lint;

// Re-export commonly used types
pub use crate::core::{
    AnalysisReport, FileReport, Finding, HistoryWindow, IssueGroup, IssueLocation,
    RefactoringRatio, Revision, SignalBand,
};

pub use crate::core::classify::classify;
pub use crate::core::errors::{ChurnError, Result};
pub use crate::core::issues::{aggregate, attach_snippets, RecommendationTable};
pub use crate::core::ratio::compute_ratio;
pub use crate::core::similarity::similarity;

pub use crate::config::ChurnscopeConfig;
pub use crate::history::acquire::{acquire, AcquiredRepo, RepoTarget};
pub use crate::history::RevisionSource;
pub use crate::io::output::{create_writer, OutputFormat, ReportWriter};
pub use crate::io::walker::FileWalker;
pub use crate::lint::{parse_lint_output, LintOutput, LintRunner};
