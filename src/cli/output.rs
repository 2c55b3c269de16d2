//! Output formatting for CLI commands
//!
//! Provides utilities for formatting command output in human-readable
//! or JSON formats. Supports colored output (respects NO_COLOR env var).

use crate::cli::OutputFormat;
use crate::core::indexer::BatchEvent;
use crate::core::types::BatchSummary;

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for file paths
    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for success messages
    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    /// Style for warning messages
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for error messages
    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }
}

/// Format duration into human-readable string
pub fn format_duration(secs: f64) -> String {
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{mins:.0}m {remaining_secs:.1}s")
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        let ms = secs * 1000.0;
        format!("{ms:.0}ms")
    }
}

/// Plain progress line for a batch event
pub fn event_line(event: &BatchEvent<'_>) -> String {
    match event {
        BatchEvent::Started { path, .. } => format!("Processing {}...", path.display()),
        BatchEvent::Indexed { file_name, .. } => {
            format!("Successfully processed and saved index for {file_name}")
        }
        BatchEvent::Failed { file_name, failure } => {
            format!("Failed to process {file_name}: {failure}")
        }
        BatchEvent::Complete(_) => "Processing complete.".to_string(),
    }
}

/// One-line batch summary (uncolored)
pub fn summary_line(summary: &BatchSummary) -> String {
    let secs = summary.duration_ms as f64 / 1000.0;
    format!(
        "Indexed {} of {} files ({} chunks, {} failed) in {}",
        summary.files_indexed,
        summary.files_found,
        summary.chunks_created,
        summary.files_failed,
        format_duration(secs)
    )
}

/// Print a batch event in the style of its outcome
pub fn print_event(event: &BatchEvent<'_>) {
    let line = event_line(event);

    match event {
        BatchEvent::Started { .. } => println!("{}", colors::dim(&line)),
        BatchEvent::Indexed { .. } => print_success(&line),
        BatchEvent::Failed { .. } => println!("{}", colors::error(&line)),
        BatchEvent::Complete(_) => print_header(&line),
    }
}

/// Print output based on format
pub fn print_output<T: serde::Serialize>(data: &T, format: OutputFormat) {
    match format {
        OutputFormat::Human => {
            // Human format should be handled by the caller
            // This is a fallback that just prints JSON
            if let Ok(json) = serde_json::to_string_pretty(data) {
                println!("{json}");
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(data) {
                println!("{json}");
            }
        }
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}", colors::success(message));
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}

/// Print a header/title
pub fn print_header(title: &str) {
    println!("{}", colors::label(title));
}
