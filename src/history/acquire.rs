//! Repository acquisition: local paths are analyzed in place, remote URLs
//! are cloned into a scratch directory first.

use crate::core::errors::{ChurnError, Result};
use std::path::{Path, PathBuf};

/// Where the analysis target lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RepoTarget {
    Local(PathBuf),
    Remote(String),
}

impl RepoTarget {
    /// Splits CLI input into local-vs-remote. Anything carrying a URL
    /// scheme or an scp-like `git@host:` prefix is remote; everything else
    /// is a local path.
    pub fn parse(raw: &str) -> Self {
        if raw.contains("://") || raw.starts_with("git@") {
            RepoTarget::Remote(raw.to_string())
        } else {
            RepoTarget::Local(PathBuf::from(raw))
        }
    }
}

/// A working tree ready for analysis.
#[derive(Clone, Debug)]
pub struct AcquiredRepo {
    pub root: PathBuf,
    /// True when the tree is a scratch clone owned by this run.
    pub cloned: bool,
}

/// Resolves the target to a working tree.
///
/// Remote targets are cloned into `clone_dir`; a leftover clone from a
/// previous run is removed first. Local targets are used in place and never
/// deleted. Clone failure aborts the run.
pub fn acquire(target: &RepoTarget, clone_dir: &Path) -> Result<AcquiredRepo> {
    match target {
        RepoTarget::Local(path) => {
            if !path.is_dir() {
                return Err(ChurnError::config(format!(
                    "target directory {} does not exist",
                    path.display()
                )));
            }
            Ok(AcquiredRepo {
                root: path.clone(),
                cloned: false,
            })
        }
        RepoTarget::Remote(url) => {
            if clone_dir.exists() {
                log::debug!("removing stale clone at {}", clone_dir.display());
                std::fs::remove_dir_all(clone_dir)?;
            }

            git2::build::RepoBuilder::new()
                .clone(url, clone_dir)
                .map_err(|source| ChurnError::Acquire {
                    target: url.clone(),
                    source,
                })?;

            log::info!("repository cloned to {}", clone_dir.display());
            Ok(AcquiredRepo {
                root: clone_dir.to_path_buf(),
                cloned: true,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::process::Command;
    use tempfile::TempDir;

    fn scratch_repo_with_commit() -> Result<(TempDir, PathBuf)> {
        let temp_dir = TempDir::new()?;
        let repo_path = temp_dir.path().to_path_buf();

        Command::new("git")
            .arg("init")
            .current_dir(&repo_path)
            .output()?;
        Command::new("git")
            .args(["config", "user.email", "test@example.com"])
            .current_dir(&repo_path)
            .output()?;
        Command::new("git")
            .args(["config", "user.name", "Test User"])
            .current_dir(&repo_path)
            .output()?;

        std::fs::write(repo_path.join("a.py"), "x = 1\n")?;
        Command::new("git")
            .args(["add", "a.py"])
            .current_dir(&repo_path)
            .output()?;
        Command::new("git")
            .args(["commit", "-m", "initial"])
            .current_dir(&repo_path)
            .output()?;

        Ok((temp_dir, repo_path))
    }

    #[test]
    fn urls_parse_as_remote() {
        assert_eq!(
            RepoTarget::parse("https://example.com/a/b.git"),
            RepoTarget::Remote("https://example.com/a/b.git".to_string())
        );
        assert_eq!(
            RepoTarget::parse("git@example.com:a/b.git"),
            RepoTarget::Remote("git@example.com:a/b.git".to_string())
        );
        assert_eq!(
            RepoTarget::parse("file:///tmp/repo"),
            RepoTarget::Remote("file:///tmp/repo".to_string())
        );
    }

    #[test]
    fn plain_paths_parse_as_local() {
        assert_eq!(
            RepoTarget::parse("../some/repo"),
            RepoTarget::Local(PathBuf::from("../some/repo"))
        );
        assert_eq!(
            RepoTarget::parse("."),
            RepoTarget::Local(PathBuf::from("."))
        );
    }

    #[test]
    fn local_target_is_used_in_place() -> Result<()> {
        let (_temp, repo_path) = scratch_repo_with_commit()?;
        let acquired = acquire(&RepoTarget::Local(repo_path.clone()), Path::new("unused"))?;

        assert_eq!(acquired.root, repo_path);
        assert!(!acquired.cloned);
        Ok(())
    }

    #[test]
    fn missing_local_target_is_an_error() {
        let result = acquire(
            &RepoTarget::Local(PathBuf::from("/no/such/dir/anywhere")),
            Path::new("unused"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn remote_target_clones_into_clone_dir() -> Result<()> {
        let (_src_temp, src_path) = scratch_repo_with_commit()?;
        let dst_temp = TempDir::new()?;
        let clone_dir = dst_temp.path().join("clone");

        let url = format!("file://{}", src_path.canonicalize()?.display());
        let acquired = acquire(&RepoTarget::Remote(url), &clone_dir)?;

        assert!(acquired.cloned);
        assert_eq!(acquired.root, clone_dir);
        assert!(clone_dir.join("a.py").exists());
        Ok(())
    }

    #[test]
    fn stale_clone_directory_is_replaced() -> Result<()> {
        let (_src_temp, src_path) = scratch_repo_with_commit()?;
        let dst_temp = TempDir::new()?;
        let clone_dir = dst_temp.path().join("clone");

        std::fs::create_dir_all(&clone_dir)?;
        std::fs::write(clone_dir.join("stale.txt"), "leftover")?;

        let url = format!("file://{}", src_path.canonicalize()?.display());
        acquire(&RepoTarget::Remote(url), &clone_dir)?;

        assert!(!clone_dir.join("stale.txt").exists());
        assert!(clone_dir.join("a.py").exists());
        Ok(())
    }
}
