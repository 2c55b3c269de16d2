//! CLI adapter for pdfvec
//!
//! Provides the command-line interface for batch indexing. This
//! module depends on `core/`; `core/` never depends on it.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!                       v
//!              +------------------+
//!              |      cli/        |
//!              | (clap adapter)   |
//!              +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// pdfvec - PDF to vector index batch tool
///
/// Extracts the text of every PDF in a directory, splits it into
/// overlapping chunks, embeds them with Google's Gemini API and saves
/// one vector index per document.
#[derive(Parser, Debug)]
#[command(name = "pdfvec")]
#[command(version)]
#[command(about = "Build vector indexes from a directory of PDFs", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (json: summary on stdout, progress lines on stderr)
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index every PDF in a directory
    Index(commands::IndexArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  pdfvec completions bash > ~/.local/share/bash-completion/completions/pdfvec
    ///   zsh:   pdfvec completions zsh > ~/.zfunc/_pdfvec
    ///   fish:  pdfvec completions fish > ~/.config/fish/completions/pdfvec.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::logging::init_logging;

    // Completions need neither config nor logging
    let command = match cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        other => other,
    };

    // Load configuration
    let config = Config::load()?;

    init_logging(&config.logging, cli.verbose);
    tracing::debug!("pdfvec {}", env!("CARGO_PKG_VERSION"));

    // Execute command
    match command {
        Commands::Index(args) => commands::index::execute(args, &config, cli.format),
        Commands::ShowConfig(args) => commands::config::execute(args, &config, cli.format),
        Commands::Completions(_) => Ok(()),
    }
}
