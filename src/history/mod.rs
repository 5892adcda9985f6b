//! Revision retrieval over libgit2.
//!
//! `git2::Repository` is not Send, so [`RevisionSource`] holds only the
//! repository path and opens a fresh `Repository` per operation. That keeps
//! per-file history walks safe to run from rayon workers.

pub mod acquire;

use crate::core::errors::{ChurnError, Result};
use crate::core::{HistoryWindow, Revision};
use chrono::{DateTime, Duration, TimeZone, Utc};
use git2::{DiffOptions, Repository, Sort};
use std::path::{Path, PathBuf};

/// Produces a file's revision sequence, newest-first.
pub struct RevisionSource {
    repo_path: PathBuf,
}

impl RevisionSource {
    /// Opens a repository, discovering the root from any subdirectory.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|source| ChurnError::Acquire {
            target: path.display().to_string(),
            source,
        })?;

        let repo_path = repo
            .workdir()
            .ok_or_else(|| ChurnError::config("bare repositories are not supported"))?
            .to_path_buf();

        Ok(Self { repo_path })
    }

    /// The repository root path.
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    fn open_repo(&self, file_path: &Path) -> Result<Repository> {
        Repository::open(&self.repo_path).map_err(|source| ChurnError::History {
            path: file_path.to_path_buf(),
            source,
        })
    }

    /// Walks history newest-first and collects the revisions of `file_path`
    /// that fall inside `window`.
    ///
    /// A commit contributes a revision when its diff against the first
    /// parent touches the file. Blob content that cannot be read (absent,
    /// non-utf8) is carried as `None` rather than failing the walk; commits
    /// whose timestamp has no UTC representation are skipped with a
    /// warning. An empty result is not an error.
    pub fn list_revisions(&self, file_path: &Path, window: HistoryWindow) -> Result<Vec<Revision>> {
        let repo = self.open_repo(file_path)?;
        let relative_path = self.to_relative_path(file_path);

        let history_err = |source: git2::Error| ChurnError::History {
            path: file_path.to_path_buf(),
            source,
        };

        let mut revwalk = repo.revwalk().map_err(history_err)?;
        revwalk.push_head().map_err(history_err)?;
        revwalk.set_sorting(Sort::TIME).map_err(history_err)?;

        let cutoff = window_cutoff(window, Utc::now());
        let mut revisions = Vec::new();

        for oid in revwalk.filter_map(|oid| oid.ok()) {
            if let HistoryWindow::Commits(limit) = window {
                if revisions.len() >= limit {
                    break;
                }
            }

            let Ok(commit) = repo.find_commit(oid) else {
                continue;
            };
            if !commit_touches_file(&repo, &commit, &relative_path) {
                continue;
            }

            let Some(timestamp) = Utc.timestamp_opt(commit.time().seconds(), 0).single() else {
                log::warn!(
                    "skipping commit {oid} for {}: timestamp out of range",
                    relative_path.display()
                );
                continue;
            };

            // The walk is time-sorted, so the first commit past the cutoff
            // ends the window.
            if let Some(cutoff) = cutoff {
                if timestamp < cutoff {
                    break;
                }
            }

            let content = blob_content(&repo, &commit, &relative_path);
            revisions.push(Revision::new(
                revisions.len(),
                short_id(oid),
                timestamp,
                content,
            ));
        }

        Ok(revisions)
    }

    fn to_relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.repo_path)
            .unwrap_or(path)
            .to_path_buf()
    }
}

/// Oldest timestamp still inside the window, if the window is time-based.
fn window_cutoff(window: HistoryWindow, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match window {
        HistoryWindow::Commits(_) => None,
        HistoryWindow::Days(days) => Some(now - Duration::days(i64::from(days))),
    }
}

/// Whether the commit changed `file_path` relative to its first parent.
fn commit_touches_file(repo: &Repository, commit: &git2::Commit, file_path: &Path) -> bool {
    let tree = match commit.tree() {
        Ok(t) => t,
        Err(_) => return false,
    };

    let file_str = file_path.to_string_lossy();

    if tree.get_path(Path::new(file_str.as_ref())).is_err() {
        return false;
    }

    let parent = commit.parents().next();
    let parent_tree = parent.and_then(|p| p.tree().ok());

    let mut diff_opts = DiffOptions::new();
    diff_opts.pathspec(file_str.as_ref());

    let diff =
        match repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut diff_opts)) {
            Ok(d) => d,
            Err(_) => return false,
        };

    diff.deltas().count() > 0
}

/// File content at this commit, or `None` when the blob cannot be read.
fn blob_content(repo: &Repository, commit: &git2::Commit, file_path: &Path) -> Option<String> {
    let tree = commit.tree().ok()?;
    let file_str = file_path.to_string_lossy();
    let entry = tree.get_path(Path::new(file_str.as_ref())).ok()?;
    let blob = repo.find_blob(entry.id()).ok()?;
    std::str::from_utf8(blob.content())
        .ok()
        .map(|content| content.to_string())
}

fn short_id(oid: git2::Oid) -> String {
    let mut id = oid.to_string();
    id.truncate(8);
    id
}
