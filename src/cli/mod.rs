//! CLI command definitions and handlers

mod batch;
mod init;
mod message;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use leo::config::LeoConfig;
use leo::engine::Mediator;
use leo::reporters::OutputFormat;
use std::io::Read;
use std::path::PathBuf;

/// Leo - Neutral rewrites for tense co-parenting messages
///
/// Runs fully offline. The optional LLM generator is only used with --ai.
#[derive(Parser, Debug)]
#[command(name = "leo")]
#[command(
    version,
    about = "Detect tension in co-parenting messages and propose neutral, child-centered rewrites",
    after_help = "\
Examples:
  leo analyze \"Tu es encore en retard !!\"     Signals, sentiment and impact
  leo rephrase \"Tu es encore en retard !!\"    Ranked rewrite options
  leo mirror < brouillon.txt                   Preview how a draft will land
  leo respond \"On change samedi ?\"            Reply suggestions
  leo batch messages.txt --mode mirror         One JSON line per message
  leo init                                     Write ~/.config/leo/config.toml"
)]
pub struct Cli {
    /// Output format: text, json
    #[arg(long, short = 'f', global = true, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: ~/.config/leo/config.toml)
    #[arg(long, global = true, env = "LEO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ask the configured LLM for extra candidates
    #[arg(long, global = true)]
    pub ai: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect tension signals and classify a message
    Analyze {
        /// Message text (reads stdin when omitted or "-")
        message: Option<String>,
    },

    /// Propose neutral rewrites of an outgoing message
    Rephrase {
        /// Message text (reads stdin when omitted or "-")
        message: Option<String>,

        /// Extra context passed to the generator
        #[arg(long)]
        context: Option<String>,

        /// Show the output of every rewrite stage
        #[arg(long)]
        explain: bool,
    },

    /// Preview the emotional impact of a draft without rewriting it
    Mirror {
        /// Message text (reads stdin when omitted or "-")
        message: Option<String>,
    },

    /// Suggest replies to a received message
    Respond {
        /// Received message (reads stdin when omitted or "-")
        message: Option<String>,

        /// Extra context passed to the generator
        #[arg(long)]
        context: Option<String>,
    },

    /// Process a file with one message per line, printing JSON lines
    Batch {
        /// Input file ("-" for stdin)
        file: PathBuf,

        /// Operation to run on each line
        #[arg(long, default_value = "rephrase", value_parser = ["analyze", "rephrase", "mirror", "respond"])]
        mode: String,
    },

    /// Write an example config file
    Init {
        /// Where to write it (default: ~/.config/leo/config.toml)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse()?;

    if let Commands::Init { path } = &cli.command {
        return init::run(path.as_deref());
    }

    let mediator = build_mediator(&cli)?;

    match cli.command {
        Commands::Analyze { message } => message::analyze(&mediator, &read_message(message)?, format),
        Commands::Rephrase {
            message,
            context,
            explain,
        } => message::rephrase(
            &mediator,
            &read_message(message)?,
            context.as_deref(),
            explain,
            format,
        ),
        Commands::Mirror { message } => message::mirror(&mediator, &read_message(message)?, format),
        Commands::Respond { message, context } => message::respond(
            &mediator,
            &read_message(message)?,
            context.as_deref(),
            format,
        ),
        Commands::Batch { file, mode } => batch::run(&mediator, &file, &mode),
        Commands::Init { .. } => Ok(()),
    }
}

fn build_mediator(cli: &Cli) -> Result<Mediator> {
    let mut config = LeoConfig::load(cli.config.as_deref())?;
    if cli.ai {
        config.ai.enabled = true;
    }
    Mediator::from_config(&config)
}

/// The positional message, or stdin when absent or "-"
fn read_message(arg: Option<String>) -> Result<String> {
    match arg {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read message from stdin")?;
            Ok(buf)
        }
    }
}
