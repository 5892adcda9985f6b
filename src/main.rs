use anyhow::Result;
use churnscope::cli::{Cli, Commands};
use churnscope::commands::{analyze, init};
use clap::Parser;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            target,
            commits,
            days,
            format,
            output,
            config,
            skip_lint,
            no_parallel,
            plain,
        } => analyze::handle_analyze(analyze::AnalyzeConfig {
            target,
            commits,
            days,
            format,
            output,
            config,
            skip_lint,
            no_parallel,
            plain,
        }),
        Commands::Init { force } => init::init_config(force),
    }
}
