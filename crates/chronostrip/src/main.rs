//! Chronostrip CLI - render a directory of images as a color barcode.
//!
//! Each image is reduced to its average color; the colors become one
//! column each of a single output strip, optionally ordered by EXIF
//! capture date.
//!
//! # Usage
//!
//! ```bash
//! # Barcode of a photo directory, discovery order
//! chronostrip generate ./photos -o barcode.png
//!
//! # Chronological strip with date labels, 4 worker threads
//! chronostrip generate ./photos -o barcode.tiff -s -t 4
//!
//! # View configuration
//! chronostrip config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Chronostrip - image collection barcode generator.
#[derive(Parser, Debug)]
#[command(name = "chronostrip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a directory and render its barcode
    Generate(cli::generate::GenerateArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match chronostrip_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `chronostrip config path`."
            );
            chronostrip_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Chronostrip v{}", chronostrip_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Generate(args) => cli::generate::execute(args, config),
        Commands::Config(args) => cli::config::execute(args),
    }
}
