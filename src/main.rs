//! Leo - co-parenting message mediation CLI
//!
//! Detects tension in a message and proposes neutral, child-centered
//! rewrites. Rule-based and fully local unless `--ai` is given.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr so JSON on stdout stays parseable
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
