//! Lexicon CLI - localized design vocabulary site generator.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "lexicon")]
#[command(about = "Localized design vocabulary site generator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to lexicon.toml config file
    #[arg(short, long, default_value = "lexicon.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a content tree in the current directory
    Init {
        /// Skip interactive prompts, overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the static site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the content API and built site
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Query the search corpus from the command line
    Search {
        /// Query text
        query: String,

        /// Locale to aggregate
        #[arg(short, long, default_value = "en")]
        locale: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes)?;
        }
        Commands::Build { output } => {
            commands::build::run(&cli.config, output)?;
        }
        Commands::Serve { port, no_open } => {
            commands::serve::run(&cli.config, port, !no_open).await?;
        }
        Commands::Search { query, locale } => {
            commands::search::run(&cli.config, &query, &locale).await?;
        }
    }

    Ok(())
}
