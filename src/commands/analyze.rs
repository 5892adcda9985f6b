//! The analyze pipeline: acquire the repository, discover source files,
//! then score each file's churn and lint findings into one report.

use crate::cli;
use crate::config::ChurnscopeConfig;
use crate::core::classify::classify;
use crate::core::issues::{aggregate, attach_snippets, RecommendationTable};
use crate::core::ratio::compute_ratio;
use crate::core::{AnalysisReport, FileReport, HistoryWindow, IssueGroup};
use crate::history::acquire::{acquire, RepoTarget};
use crate::history::RevisionSource;
use crate::io::output::create_writer;
use crate::io::walker::FileWalker;
use crate::lint::{LintOutput, LintRunner};
use anyhow::{Context, Result};
use chrono::Utc;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

const PROGRESS_TEMPLATE: &str = "{msg} {pos}/{len} files ({percent}%) - {eta}";

pub struct AnalyzeConfig {
    pub target: String,
    pub commits: Option<usize>,
    pub days: Option<u32>,
    pub format: cli::OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub skip_lint: bool,
    pub no_parallel: bool,
    pub plain: bool,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    configure_output(config.plain);

    let settings = ChurnscopeConfig::load(config.config.as_deref())?;
    let window = resolve_window(config.commits, config.days, &settings);

    let target = RepoTarget::parse(&config.target);
    let acquired = acquire(&target, &settings.clone.dir)
        .with_context(|| format!("failed to acquire repository {}", config.target))?;
    if acquired.cloned {
        log::info!("analyzing scratch clone at {}", acquired.root.display());
    } else {
        log::info!("analyzing {} in place", acquired.root.display());
    }

    let source = RevisionSource::open(&acquired.root)
        .with_context(|| format!("failed to open repository at {}", acquired.root.display()))?;

    let files = FileWalker::new(acquired.root.clone())
        .with_extensions(settings.files.extensions.clone())
        .with_ignore_patterns(settings.files.ignore.clone())
        .walk()
        .context("failed to walk repository files")?;
    log::info!("discovered {} source files", files.len());

    let runner = prepare_lint_runner(&settings, config.skip_lint);
    let table = settings.recommendation_table();

    let lint_failed = AtomicBool::new(false);
    let context = FileContext {
        source: &source,
        window,
        runner: runner.as_ref(),
        lint_failed: &lint_failed,
        table: &table,
    };

    let progress = create_progress_bar(files.len() as u64, config.plain);
    let reports = if config.no_parallel {
        files
            .iter()
            .map(|path| analyze_file(path, &context))
            .inspect(|_| progress.inc(1))
            .collect()
    } else {
        files
            .par_iter()
            .progress_with(progress.clone())
            .map(|path| analyze_file(path, &context))
            .collect()
    };
    progress.finish_and_clear();

    let report = AnalysisReport {
        target: config.target,
        repo_root: acquired.root,
        generated_at: Utc::now(),
        window,
        files: reports,
    };

    let mut writer = create_writer(config.format.into(), config.output.as_deref())?;
    writer.write_report(&report)
}

/// Shared, read-only inputs for one per-file analysis step. `lint_failed`
/// latches after a spawn failure so a broken linter is not retried on
/// every remaining file.
struct FileContext<'a> {
    source: &'a RevisionSource,
    window: HistoryWindow,
    runner: Option<&'a LintRunner>,
    lint_failed: &'a AtomicBool,
    table: &'a RecommendationTable,
}

/// Scores one file. Per-file failures are absorbed here: a history error
/// degrades to "insufficient data" and a linter error to no findings, so
/// one bad file never interrupts the rest of the run.
fn analyze_file(path: &Path, ctx: &FileContext) -> FileReport {
    let relative = relative_display(path, ctx.source.repo_path());

    let revisions = match ctx.source.list_revisions(path, ctx.window) {
        Ok(revisions) => revisions,
        Err(err) => {
            log::warn!("history walk failed for {relative}: {err}");
            Vec::new()
        }
    };
    log::debug!("{relative}: {} revisions sampled", revisions.len());

    let ratio = compute_ratio(&revisions);
    let band = classify(&ratio);

    let (issues, rating, dropped) = run_lint(path, ctx.runner, ctx.lint_failed, ctx.table);

    FileReport {
        path: relative,
        revisions: revisions.len(),
        ratio,
        band,
        recommendation: band.recommendation().to_string(),
        issues,
        rating,
        dropped_findings: dropped,
    }
}

fn run_lint(
    path: &Path,
    runner: Option<&LintRunner>,
    lint_failed: &AtomicBool,
    table: &RecommendationTable,
) -> (Vec<IssueGroup>, Option<String>, usize) {
    let Some(runner) = runner else {
        return (Vec::new(), None, 0);
    };
    if lint_failed.load(Ordering::Relaxed) {
        return (Vec::new(), None, 0);
    }

    let LintOutput {
        findings,
        rating,
        dropped,
    } = match runner.run(path) {
        Ok(output) => output,
        Err(err) => {
            log::error!("linter failed, skipping lint for remaining files: {err}");
            lint_failed.store(true, Ordering::Relaxed);
            return (Vec::new(), None, 0);
        }
    };

    let mut issues = aggregate(&findings, table);
    if let Ok(content) = crate::io::read_file(path) {
        attach_snippets(&mut issues, &content);
    }

    (issues, rating, dropped)
}

/// CLI flags win over config; a day window wins over a commit cap.
fn resolve_window(
    commits: Option<usize>,
    days: Option<u32>,
    settings: &ChurnscopeConfig,
) -> HistoryWindow {
    if let Some(days) = days {
        return HistoryWindow::Days(days);
    }
    if let Some(commits) = commits {
        return HistoryWindow::Commits(commits);
    }
    match settings.history.window_days {
        Some(days) => HistoryWindow::Days(days),
        None => HistoryWindow::Commits(settings.history.max_commits),
    }
}

/// Builds the runner only when linting is wanted and the binary exists; a
/// missing linter is one warning, not a fatal error.
fn prepare_lint_runner(settings: &ChurnscopeConfig, skip_lint: bool) -> Option<LintRunner> {
    if skip_lint || !settings.lint.enabled {
        return None;
    }

    let runner = LintRunner::new(settings.lint.command.clone(), settings.lint.args.clone());
    match runner.probe() {
        Ok(binary) => {
            log::debug!("linter resolved to {}", binary.display());
            Some(runner)
        }
        Err(err) => {
            log::warn!("{err}; continuing with churn analysis only");
            None
        }
    }
}

fn configure_output(plain: bool) {
    if plain {
        colored::control::set_override(false);
    }
}

fn create_progress_bar(len: u64, plain: bool) -> ProgressBar {
    use std::io::IsTerminal;

    if plain || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template(PROGRESS_TEMPLATE).expect("constant progress template"),
    );
    bar.set_message("analyzing");
    bar
}

fn relative_display(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
