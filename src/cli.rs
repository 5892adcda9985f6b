use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "churnscope")]
#[command(about = "Refactoring churn and code smell analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a repository for refactoring churn and lint findings
    Analyze {
        /// Repository to analyze: a local path or a remote URL to clone
        target: String,

        /// Maximum commits sampled per file
        #[arg(short = 'n', long = "commits")]
        commits: Option<usize>,

        /// Trailing day window instead of a commit count
        #[arg(long = "days", conflicts_with = "commits")]
        days: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to .churnscope.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip linter invocation and report churn only
        #[arg(long = "skip-lint")]
        skip_lint: bool,

        /// Analyze files sequentially instead of in parallel
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Disable colors and progress output
        #[arg(long)]
        plain: bool,
    },

    /// Initialize churnscope configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}
