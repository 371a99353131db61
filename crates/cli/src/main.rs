//! agendum CLI — the main entry point.
//!
//! Commands:
//! - `chunk`    — Render a meeting's history into budgeted chunks
//! - `names`    — Show the speaker label table
//! - `prompts`  — Render summary prompts without calling a model
//! - `config`   — Print the effective (or default) configuration

use agendum_core::AgendaOrder;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "agendum",
    about = "agendum — meeting history chunking for LLM prompts",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a meeting's chat history into chunks
    Chunk {
        /// Meeting record (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Token budget per chunk (overrides config)
        #[arg(short, long)]
        budget: Option<usize>,

        /// Agenda ordering: numeric or first-seen (overrides config)
        #[arg(short, long)]
        order: Option<AgendaOrder>,
    },

    /// Show resolved speaker labels
    Names {
        /// Meeting record (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Render summary prompts (dry run)
    Prompts {
        /// Meeting record (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print configuration as TOML
    Config {
        /// Print built-in defaults instead of the loaded config
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Chunk {
            input,
            budget,
            order,
        } => commands::chunk::run(&input, budget, order).await?,
        Commands::Names { input } => commands::names::run(&input).await?,
        Commands::Prompts { input } => commands::prompts::run(&input).await?,
        Commands::Config { default } => commands::config_cmd::run(default).await?,
    }

    Ok(())
}
