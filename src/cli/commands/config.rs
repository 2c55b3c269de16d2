//! Config command - show current configuration

use crate::cli::output::{colors, print_header, print_output};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;

/// Arguments for the show-config command
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Only print the location of the user config file
    #[arg(long)]
    pub path: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    pub config_file_exists: bool,
    #[serde(flatten)]
    pub config: &'a Config,
}

impl<'a> ConfigResponse<'a> {
    pub fn new(config: &'a Config, xdg: &XdgDirs) -> Self {
        let config_file = xdg.config_file();
        Self {
            config_file: config_file.to_string_lossy().into_owned(),
            config_file_exists: config_file.exists(),
            config,
        }
    }
}

/// Execute the show-config command
pub fn execute(
    args: ConfigArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let xdg = XdgDirs::new();
    xdg.log_paths();

    let response = ConfigResponse::new(config, &xdg);

    if args.path {
        println!("{}", response.config_file);
        return Ok(());
    }

    match format {
        OutputFormat::Human => {
            let config = response.config;
            print_header("Configuration:");
            let status = if response.config_file_exists {
                colors::success("found")
            } else {
                colors::dim("not found, using defaults")
            };
            println!(
                "  config_file: {} ({status})",
                colors::file_path(&response.config_file)
            );
            println!("  paths:");
            println!("    input_dir: {}", config.paths.input_dir.display());
            println!("    output_dir: {}", config.paths.output_dir.display());
            println!("    exclude_patterns: {:?}", config.paths.exclude_patterns);
            println!("  embedding:");
            println!("    base_url: {}", config.embedding.base_url);
            println!("    model: {}", config.embedding.model);
            println!("    task_type: {}", config.embedding.task_type);
            println!(
                "    batch_size: {}",
                colors::number(&config.embedding.batch_size.to_string())
            );
            println!(
                "    timeout_sec: {}",
                colors::number(&config.embedding.timeout_sec.to_string())
            );
            println!("  logging:");
            println!("    level: {}", config.logging.level);
            println!("    json: {}", config.logging.json);
        }
        OutputFormat::Json => print_output(&response, format),
    }

    Ok(())
}
