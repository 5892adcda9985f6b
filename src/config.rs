use crate::core::issues::RecommendationTable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".churnscope.toml";

/// Top-level configuration, loaded once and passed down; there is no
/// process-global config state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChurnscopeConfig {
    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub lint: LintConfig,

    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub clone: CloneConfig,

    /// Guidance-text overrides keyed by issue code, merged over the
    /// built-in table.
    #[serde(default)]
    pub recommendations: HashMap<String, String>,
}

/// History sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum commits sampled per file
    #[serde(default = "default_max_commits")]
    pub max_commits: usize,

    /// Trailing day window; takes precedence over max_commits when set
    #[serde(default)]
    pub window_days: Option<u32>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_commits: default_max_commits(),
            window_days: None,
        }
    }
}

/// Linter invocation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Linter binary looked up on PATH
    #[serde(default = "default_lint_command")]
    pub command: String,

    /// Extra arguments placed before the file path
    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default = "default_lint_enabled")]
    pub enabled: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            command: default_lint_command(),
            args: Vec::new(),
            enabled: default_lint_enabled(),
        }
    }
}

/// Source discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// File extensions to analyze
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns excluded from the walk
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore: Vec::new(),
        }
    }
}

/// Clone scratch-directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneConfig {
    /// Directory remote targets are cloned into
    #[serde(default = "default_clone_dir")]
    pub dir: PathBuf,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            dir: default_clone_dir(),
        }
    }
}

fn default_max_commits() -> usize {
    50
}

fn default_lint_command() -> String {
    "pylint".to_string()
}

fn default_lint_enabled() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    vec!["py".to_string()]
}

fn default_clone_dir() -> PathBuf {
    PathBuf::from("cloned_repo")
}

impl ChurnscopeConfig {
    /// Loads configuration from an explicit path, from `.churnscope.toml`
    /// in the current directory, or falls back to defaults. An explicit
    /// path must exist; the implicit one may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let implicit = Path::new(CONFIG_FILE_NAME);
                if implicit.is_file() {
                    Self::from_file(implicit)?
                } else {
                    Self::default()
                }
            }
        };

        config
            .validate()
            .map_err(|message| anyhow::anyhow!("configuration error: {message}"))?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_max_commits(self.history.max_commits)?;
        validate_window_days(self.history.window_days)?;
        validate_lint_command(&self.lint.command)?;
        validate_extensions(&self.files.extensions)?;
        Ok(())
    }

    /// Built-in recommendation table with the `[recommendations]` section
    /// merged over it.
    pub fn recommendation_table(&self) -> RecommendationTable {
        let mut table = RecommendationTable::default();
        table.extend(
            self.recommendations
                .iter()
                .map(|(code, text)| (code.clone(), text.clone())),
        );
        table
    }
}

fn validate_max_commits(max_commits: usize) -> Result<(), String> {
    if max_commits == 0 {
        Err("history.max_commits must be at least 1".to_string())
    } else {
        Ok(())
    }
}

fn validate_window_days(window_days: Option<u32>) -> Result<(), String> {
    match window_days {
        Some(0) => Err("history.window_days must be at least 1".to_string()),
        _ => Ok(()),
    }
}

fn validate_lint_command(command: &str) -> Result<(), String> {
    if command.trim().is_empty() {
        Err("lint.command must not be empty".to_string())
    } else {
        Ok(())
    }
}

fn validate_extensions(extensions: &[String]) -> Result<(), String> {
    if extensions.is_empty() {
        Err("files.extensions must list at least one extension".to_string())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_usable() {
        let config = ChurnscopeConfig::default();
        assert_eq!(config.history.max_commits, 50);
        assert_eq!(config.history.window_days, None);
        assert_eq!(config.lint.command, "pylint");
        assert!(config.lint.enabled);
        assert_eq!(config.files.extensions, vec!["py"]);
        assert_eq!(config.clone.dir, PathBuf::from("cloned_repo"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: ChurnscopeConfig = toml::from_str(
            r#"
            [history]
            max_commits = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.history.max_commits, 10);
        assert_eq!(config.lint.command, "pylint");
        assert_eq!(config.files.extensions, vec!["py"]);
    }

    #[test]
    fn full_config_parses() {
        let config: ChurnscopeConfig = toml::from_str(
            r#"
            [history]
            max_commits = 25
            window_days = 90

            [lint]
            command = "ruff"
            args = ["check", "--output-format=pylint"]
            enabled = false

            [files]
            extensions = ["py", "pyi"]
            ignore = ["*/migrations/*"]

            [clone]
            dir = "scratch"

            [recommendations]
            E9999 = "Fix the syntax error before anything else."
            "#,
        )
        .unwrap();

        assert_eq!(config.history.window_days, Some(90));
        assert_eq!(config.lint.command, "ruff");
        assert!(!config.lint.enabled);
        assert_eq!(config.files.ignore, vec!["*/migrations/*"]);
        assert_eq!(config.clone.dir, PathBuf::from("scratch"));

        let table = config.recommendation_table();
        assert_eq!(
            table.text_for("E9999"),
            "Fix the syntax error before anything else."
        );
        // Built-in entries survive the merge.
        assert_eq!(
            table.text_for("C0303"),
            "Consider removing unnecessary empty spaces."
        );
    }

    #[test]
    fn zero_commit_window_is_rejected() {
        let config: ChurnscopeConfig = toml::from_str("[history]\nmax_commits = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_day_window_is_rejected() {
        let config: ChurnscopeConfig = toml::from_str("[history]\nwindow_days = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_lint_command_is_rejected() {
        let config: ChurnscopeConfig = toml::from_str("[lint]\ncommand = \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_extension_list_is_rejected() {
        let config: ChurnscopeConfig = toml::from_str("[files]\nextensions = []\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let missing = Path::new("/no/such/churnscope/config.toml");
        assert!(ChurnscopeConfig::load(Some(missing)).is_err());
    }

    #[test]
    fn explicit_config_path_loads() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(&path, "[history]\nmax_commits = 7\n").unwrap();

        let config = ChurnscopeConfig::load(Some(&path)).unwrap();
        assert_eq!(config.history.max_commits, 7);
    }
}
