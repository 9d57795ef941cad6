//! CLI entry point for the visual analogy solver

use clap::Parser;
use ravensolve::io::cli::{Cli, ProblemProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> ravensolve::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut processor = ProblemProcessor::new(cli);
    processor.process()?;
    Ok(())
}
