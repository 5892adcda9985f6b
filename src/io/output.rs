use crate::core::{AnalysisReport, FileReport, IssueGroup, RefactoringRatio, SignalBand};
use colored::*;
use std::io::Write;
use std::path::Path;

#[derive(Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait ReportWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_files(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Churnscope Analysis Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Target: {}", report.target)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "History window: {}", report.window)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;

        if report.files.is_empty() {
            writeln!(self.writer, "No matching source files found.")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        let measured = measured_count(&report.files);
        let high = band_count(&report.files, SignalBand::High);
        let findings = total_findings(&report.files);

        writeln!(self.writer, "| Metric | Value | Status |")?;
        writeln!(self.writer, "|--------|-------|--------|")?;
        self.write_summary_row("Files analyzed", &report.files.len().to_string(), "-")?;
        self.write_summary_row("Files with measured churn", &measured.to_string(), "-")?;
        self.write_summary_row(
            "High churn files",
            &high.to_string(),
            if high > 0 { "⚠️ Review" } else { "✅ Good" },
        )?;
        self.write_summary_row(
            "Lint findings",
            &findings.to_string(),
            if findings > 0 { "⚠️ Present" } else { "✅ Clean" },
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary_row(&mut self, metric: &str, value: &str, status: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "| {metric} | {value} | {status} |")?;
        Ok(())
    }

    fn write_files(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if report.files.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Files")?;
        writeln!(self.writer)?;

        for file in &report.files {
            self.write_file(file)?;
        }
        Ok(())
    }

    fn write_file(&mut self, file: &FileReport) -> anyhow::Result<()> {
        writeln!(self.writer, "### {}", file.path)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "- Refactoring ratio: {}",
            format_ratio(&file.ratio)
        )?;
        writeln!(self.writer, "- Signal: {}", file.band)?;
        writeln!(self.writer, "- Recommendation: {}", file.recommendation)?;
        writeln!(self.writer, "- Revisions sampled: {}", file.revisions)?;
        if let Some(rating) = &file.rating {
            writeln!(self.writer, "- {rating}")?;
        }
        writeln!(self.writer)?;

        if !file.issues.is_empty() {
            writeln!(self.writer, "#### Issues")?;
            writeln!(self.writer)?;
            for group in &file.issues {
                self.write_issue_group(group)?;
            }
        }

        if file.dropped_findings > 0 {
            writeln!(
                self.writer,
                "{} linter output lines could not be parsed.",
                file.dropped_findings
            )?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_issue_group(&mut self, group: &IssueGroup) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "- **{}** ({} locations): {}",
            group.code,
            group.locations.len(),
            group.message
        )?;
        for location in &group.locations {
            match &location.snippet {
                Some(snippet) => {
                    writeln!(self.writer, "  - line {}: `{}`", location.line, snippet)?
                }
                None => writeln!(self.writer, "  - line {}", location.line)?,
            }
        }
        writeln!(self.writer, "  - Recommendation: {}", group.recommendation)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter;

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportWriter for TerminalWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        print_header(report);
        print_summary(report);
        print_churn_hotspots(report);
        for file in &report.files {
            print_file(file);
        }
        Ok(())
    }
}

fn print_header(report: &AnalysisReport) {
    println!("{}", "Churnscope Analysis Report".bold().blue());
    println!("{}", "==========================".blue());
    println!("Target: {}", report.target);
    println!("History window: {}", report.window);
    println!();
}

fn print_summary(report: &AnalysisReport) {
    if report.files.is_empty() {
        println!("No matching source files found.");
        return;
    }

    println!("{} Summary:", "📊".bold());
    println!("  Files analyzed: {}", report.files.len());
    println!(
        "  Files with measured churn: {}",
        measured_count(&report.files)
    );

    let high = band_count(&report.files, SignalBand::High);
    let high_display = if high > 0 {
        high.to_string().red().to_string()
    } else {
        high.to_string().green().to_string()
    };
    println!("  High churn files: {high_display}");
    println!("  Lint findings: {}", total_findings(&report.files));
    println!();
}

fn print_churn_hotspots(report: &AnalysisReport) {
    let mut hot: Vec<&FileReport> = report
        .files
        .iter()
        .filter(|f| f.band == SignalBand::High)
        .collect();
    if hot.is_empty() {
        return;
    }
    hot.sort_by(|a, b| {
        let av = a.ratio.value.unwrap_or(0.0);
        let bv = b.ratio.value.unwrap_or(0.0);
        bv.partial_cmp(&av).unwrap_or(std::cmp::Ordering::Equal)
    });

    println!("{} Churn Hotspots (top 5):", "⚠️".yellow());
    hot.iter().take(5).enumerate().for_each(|(i, file)| {
        println!(
            "  {}. {} - ratio: {}",
            i + 1,
            file.path.yellow(),
            format_ratio(&file.ratio).red()
        );
    });
    println!();
}

fn print_file(file: &FileReport) {
    println!("{}", file.path.bold());
    println!(
        "  Refactoring ratio: {} ({})",
        format_ratio(&file.ratio),
        band_label(file.band)
    );
    println!("  Recommendation: {}", file.recommendation);
    println!("  Revisions sampled: {}", file.revisions);
    if let Some(rating) = &file.rating {
        println!("  {}", rating.dimmed());
    }

    for group in &file.issues {
        print_issue_group(group);
    }
    if file.dropped_findings > 0 {
        println!(
            "  {} linter output lines could not be parsed",
            file.dropped_findings
        );
    }
    println!();
}

fn print_issue_group(group: &IssueGroup) {
    println!(
        "  [{}] {} ({} locations)",
        group.code.yellow(),
        group.message,
        group.locations.len()
    );
    for location in &group.locations {
        match &location.snippet {
            Some(snippet) => println!("    line {}: {}", location.line, snippet.dimmed()),
            None => println!("    line {}", location.line),
        }
    }
    println!("    {}", group.recommendation);
}

fn band_label(band: SignalBand) -> ColoredString {
    match band {
        SignalBand::Unknown => "unknown".normal(),
        SignalBand::None => "none".green(),
        SignalBand::Low => "low".green(),
        SignalBand::Moderate => "moderate".yellow(),
        SignalBand::High => "high".red(),
    }
}

/// "0.43" for measured ratios, "insufficient data" otherwise.
pub fn format_ratio(ratio: &RefactoringRatio) -> String {
    match ratio.value {
        Some(value) if ratio.samples > 0 => format!("{value:.2}"),
        _ => "insufficient data".to_string(),
    }
}

fn measured_count(files: &[FileReport]) -> usize {
    files.iter().filter(|f| f.ratio.is_measured()).count()
}

fn band_count(files: &[FileReport], band: SignalBand) -> usize {
    files.iter().filter(|f| f.band == band).count()
}

fn total_findings(files: &[FileReport]) -> usize {
    files.iter().map(|f| f.issue_count()).sum()
}

pub fn create_writer(
    format: OutputFormat,
    output_path: Option<&Path>,
) -> anyhow::Result<Box<dyn ReportWriter>> {
    match (format, output_path) {
        (OutputFormat::Json, Some(path)) => {
            Ok(Box::new(JsonWriter::new(std::fs::File::create(path)?)))
        }
        (OutputFormat::Json, None) => Ok(Box::new(JsonWriter::new(std::io::stdout()))),
        (OutputFormat::Markdown, Some(path)) => {
            Ok(Box::new(MarkdownWriter::new(std::fs::File::create(path)?)))
        }
        (OutputFormat::Markdown, None) => Ok(Box::new(MarkdownWriter::new(std::io::stdout()))),
        (OutputFormat::Terminal, None) => Ok(Box::new(TerminalWriter::new())),
        (OutputFormat::Terminal, Some(_)) => {
            anyhow::bail!("terminal format writes to stdout only; use json or markdown with -o")
        }
    }
}
