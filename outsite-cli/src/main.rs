//! # outsite CLI
//!
//! Command-line interface for the outsite outline-to-website generator.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "outsite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults are used when it does not exist)
    #[arg(long, default_value = "outsite.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static site from an unpacked export
    Build {
        /// Export directory (overrides paths.export)
        #[arg(long)]
        export: Option<PathBuf>,

        /// Output directory (overrides paths.output)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the resolved publication settings and the pages a build would write
    Plan {
        /// Export directory (overrides paths.export)
        #[arg(long)]
        export: Option<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Build { export, output } => {
            let config = commands::load_config(&cli.config, export, output)?;
            commands::build_site(config)
        }
        Commands::Plan { export, json } => {
            let config = commands::load_config(&cli.config, export, None)?;
            commands::show_plan(config, json)
        }
    }
}
