//! Index command - turn a directory of PDFs into vector indexes

use crate::cli::output::{self, colors, print_output, print_warning};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::indexer::{run_batch, BatchEvent};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Args;

/// Prompt shown when no API key was supplied
pub const API_KEY_PROMPT: &str = "Enter your Google API Key: ";

/// Printed when the user declines to provide a key
pub const API_KEY_REQUIRED: &str = "API Key is required. Exiting...";

/// Arguments for the index command
#[derive(Args, Debug, Default)]
pub struct IndexArgs {
    /// Directory containing the PDF files [default: from config, "pdfs"]
    pub input: Option<PathBuf>,

    /// Directory receiving the indexes [default: from config, "vector_index"]
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Google API key (prompted for when absent)
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// File name patterns to skip (can be specified multiple times)
    #[arg(long, short = 'e')]
    pub exclude: Vec<String>,

    /// Suppress per-file progress lines (failures are still reported in human format)
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl IndexArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &Config) -> Config {
        let mut settings = config.clone();
        if let Some(input) = &self.input {
            settings.paths.input_dir = input.clone();
        }
        if let Some(output) = &self.output {
            settings.paths.output_dir = output.clone();
        }
        if !self.exclude.is_empty() {
            settings.paths.exclude_patterns = self.exclude.clone();
        }
        settings
    }
}

/// Destination of per-file progress lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Human format: progress on stdout next to the summary line
    Stdout,
    /// JSON format: progress on stderr, stdout keeps only the summary
    Stderr,
    /// `--quiet`
    Silent,
}

impl Progress {
    pub fn for_output(format: OutputFormat, quiet: bool) -> Self {
        match (quiet, format) {
            (true, _) => Progress::Silent,
            (false, OutputFormat::Human) => Progress::Stdout,
            (false, OutputFormat::Json) => Progress::Stderr,
        }
    }

    fn report(self, event: &BatchEvent<'_>, format: OutputFormat) {
        match self {
            Progress::Stdout => output::print_event(event),
            Progress::Stderr => eprintln!("{}", output::event_line(event)),
            Progress::Silent => {
                if let BatchEvent::Failed { file_name, failure } = event {
                    if format == OutputFormat::Human {
                        print_warning(&format!("Failed to process {file_name}: {failure}"));
                    }
                }
            }
        }
    }
}

/// Show `prompt` on `out` and read one line from `input`.
///
/// Returns the trimmed line; end of input yields an empty string.
pub fn read_api_key(input: &mut dyn BufRead, out: &mut dyn Write, prompt: &str) -> io::Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Execute the index command
pub fn execute(
    args: IndexArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = args.apply(config);
    settings.validate()?;
    settings.log_config();

    let api_key = match args.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => read_api_key(&mut io::stdin().lock(), &mut io::stdout(), API_KEY_PROMPT)?,
    };

    if api_key.is_empty() {
        println!("{API_KEY_REQUIRED}");
        return Ok(());
    }

    let progress = Progress::for_output(format, args.quiet);

    if progress == Progress::Stdout {
        eprintln!(
            "Indexing {} into {}...",
            colors::file_path(&settings.paths.input_dir.display().to_string()),
            colors::file_path(&settings.paths.output_dir.display().to_string())
        );
    }

    let summary = run_batch(&settings, &api_key, |event| progress.report(event, format))?;

    match format {
        OutputFormat::Human => {
            if !args.quiet {
                println!("{}", colors::number(&output::summary_line(&summary)));
            }
        }
        OutputFormat::Json => print_output(&summary, format),
    }

    Ok(())
}
