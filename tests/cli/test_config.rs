//! Tests for the show-config command

use pdfvec::cli::commands::config::{execute, ConfigArgs, ConfigResponse};
use pdfvec::cli::OutputFormat;
use pdfvec::core::config::Config;
use pdfvec::core::xdg::XdgDirs;
use serial_test::serial;
use std::path::PathBuf;

#[test]
#[serial]
fn test_response_points_at_config_file() {
    std::env::set_var("PDFVEC_CONFIG_FILE", "/nonexistent/pdfvec.toml");

    let config = Config::default();
    let response = ConfigResponse::new(&config, &XdgDirs::new());

    assert_eq!(response.config_file, "/nonexistent/pdfvec.toml");
    assert!(!response.config_file_exists);

    std::env::remove_var("PDFVEC_CONFIG_FILE");
}

#[test]
#[serial]
fn test_response_json_flattens_config() {
    let mut config = Config::default();
    config.paths.input_dir = PathBuf::from("papers");

    let response = ConfigResponse::new(&config, &XdgDirs::new());
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["paths"]["input_dir"], "papers");
    assert_eq!(value["embedding"]["model"], "models/embedding-001");
    assert_eq!(value["logging"]["level"], "warn");
    assert!(value["config_file"].is_string());
    assert!(value.get("api_key").is_none());
}

#[test]
#[serial]
fn test_execute_both_formats() {
    let config = Config::default();

    assert!(execute(ConfigArgs::default(), &config, OutputFormat::Human).is_ok());
    assert!(execute(ConfigArgs::default(), &config, OutputFormat::Json).is_ok());
    assert!(execute(ConfigArgs { path: true }, &config, OutputFormat::Human).is_ok());
}
