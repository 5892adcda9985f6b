//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for churnscope operations
#[derive(Debug, Error)]
pub enum ChurnError {
    /// Repository could not be opened or cloned
    #[error("failed to acquire repository {target}: {source}")]
    Acquire {
        target: String,
        #[source]
        source: git2::Error,
    },

    /// Git history walk failed for one file
    #[error("git history error for {path}: {source}")]
    History {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    /// Linter binary missing from PATH
    #[error("linter `{command}` is not available: {reason}")]
    LintUnavailable { command: String, reason: String },

    /// Linter process could not be run
    #[error("linter `{command}` failed on {path}: {source}")]
    Lint {
        command: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChurnError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, ChurnError>;
