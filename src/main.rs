#![forbid(unsafe_code)]
//! langreg command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use langreg::commands::{execute_iso639, execute_registry, Iso639Options, RegistryOptions};
use langreg::Config;

#[derive(Parser)]
#[command(name = "langreg")]
#[command(about = "Compile the IANA language subtag registry and ISO 639-3 code table")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".langreg.json")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the language subtag registry to typed JSON records
    Registry {
        /// Read the registry from a local file instead of downloading
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file path (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use only the local download cache, never the network
        #[arg(long)]
        offline: bool,
    },

    /// Compile the ISO 639-3 code table to typed JSON records
    Iso639 {
        /// Read the table from a local file instead of downloading
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file path (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use only the local download cache, never the network
        #[arg(long)]
        offline: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "langreg=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Registry { input, output, offline } => {
            let options = RegistryOptions { input, output, offline };
            execute_registry(options, config)?;
        }

        Commands::Iso639 { input, output, offline } => {
            let options = Iso639Options { input, output, offline };
            execute_iso639(options, config)?;
        }
    }

    Ok(())
}
