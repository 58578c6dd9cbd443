//! sitemapgen
//!
//! Command-line front end for the sitemap generator.
//!
//! # Commands
//!
//! - `generate` - Write sitemap files from a list of URLs
//! - `inspect` - Summarize the sitemap files for a base name
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use commands::generate::{GenerateArgs, InputFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Size- and count-bounded XML sitemap generator.
#[derive(Parser)]
#[command(name = "sitemapgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write sitemap files from a list of URLs
    Generate {
        /// Input file, or `-` for stdin
        input: PathBuf,

        /// JSON file with generator options; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Base file name, without extension
        #[arg(short, long)]
        filename: Option<String>,

        /// Public URL of the output directory (used in the index)
        #[arg(short, long)]
        base_url: Option<String>,

        /// Maximum entries per file (0 = unlimited)
        #[arg(long, allow_hyphen_values = true)]
        max_urls: Option<i64>,

        /// Maximum bytes per file (0 = protocol default)
        #[arg(long, allow_hyphen_values = true)]
        max_file_size: Option<i64>,

        /// Input format
        #[arg(long, value_enum, default_value_t = InputFormat::Lines)]
        format: InputFormat,

        /// Print the session summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize the sitemap files for a base name
    Inspect {
        /// Directory holding the sitemap files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Base file name, without extension
        #[arg(short, long, default_value = sitemap_core::DEFAULT_FILENAME)]
        filename: String,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            input,
            config,
            dir,
            filename,
            base_url,
            max_urls,
            max_file_size,
            format,
            json,
        } => {
            let args = GenerateArgs {
                input,
                config,
                dir,
                filename,
                base_url,
                max_urls,
                max_file_size,
                format,
                json,
            };
            commands::generate::run(&args)?;
        }
        Commands::Inspect {
            dir,
            filename,
            format,
        } => {
            commands::inspect::run(&dir, &filename, &format)?;
        }
        Commands::Version => {
            println!("sitemapgen v{}", env!("CARGO_PKG_VERSION"));
            println!("sitemap_core v{}", sitemap_core::VERSION);
        }
    }

    Ok(())
}
