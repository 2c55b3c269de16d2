//! Configuration management for pdfvec.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//! Chunking parameters are fixed and deliberately not part of the
//! configuration. The API key is never stored here; it is passed
//! to the batch entry point separately.

use crate::core::error::{PdfVecError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Largest batch accepted by `batchEmbedContents`
pub const MAX_EMBED_BATCH_SIZE: usize = 100;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input and output locations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Directory scanned for `*.pdf` files
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory receiving one index per document
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name patterns to skip (glob syntax)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Embedding service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    /// API root, without the model path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Embedding model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Task type sent with every request
    #[serde(default = "default_task_type")]
    pub task_type: String,

    /// Texts per request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_sec: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default level for the `pdfvec` target (overridden by RUST_LOG)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of text
    #[serde(default)]
    pub json: bool,
}

// Default value functions
fn default_input_dir() -> PathBuf {
    PathBuf::from("pdfs")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("vector_index")
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "models/embedding-001".to_string()
}

fn default_task_type() -> String {
    "RETRIEVAL_DOCUMENT".to_string()
}

fn default_batch_size() -> usize {
    MAX_EMBED_BATCH_SIZE
}

fn default_timeout() -> u64 {
    60
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            task_type: default_task_type(),
            batch_size: default_batch_size(),
            timeout_sec: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| PdfVecError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. PDFVEC_CONFIG env var
    /// 2. XDG config file (~/.config/pdfvec/config.toml)
    /// 3. ./pdfvec.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("PDFVEC_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("pdfvec.toml").exists() {
                Self::from_file("pdfvec.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Paths
        if let Ok(dir) = env::var("PDFVEC_INPUT_DIR") {
            self.paths.input_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("PDFVEC_OUTPUT_DIR") {
            self.paths.output_dir = PathBuf::from(dir);
        }

        // Embedding service
        if let Ok(url) = env::var("PDFVEC_EMBEDDING_URL") {
            self.embedding.base_url = url;
        }
        if let Ok(model) = env::var("PDFVEC_EMBEDDING_MODEL") {
            self.embedding.model = model;
        }
        if let Ok(batch_size) = env::var("PDFVEC_BATCH_SIZE") {
            if let Ok(size) = batch_size.parse() {
                self.embedding.batch_size = size;
            }
        }
        if let Ok(timeout) = env::var("PDFVEC_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.embedding.timeout_sec = t;
            }
        }

        // Logging
        if let Ok(level) = env::var("PDFVEC_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.embedding.batch_size == 0 || self.embedding.batch_size > MAX_EMBED_BATCH_SIZE {
            return Err(PdfVecError::ConfigError(format!(
                "Embedding batch size must be between 1 and {MAX_EMBED_BATCH_SIZE}"
            )));
        }

        if self.embedding.timeout_sec == 0 {
            return Err(PdfVecError::ConfigError(
                "Embedding timeout must be non-zero".to_string(),
            ));
        }

        if self.embedding.model.trim().is_empty() {
            return Err(PdfVecError::ConfigError(
                "Embedding model must not be empty".to_string(),
            ));
        }

        if !self.embedding.base_url.starts_with("http://")
            && !self.embedding.base_url.starts_with("https://")
        {
            return Err(PdfVecError::ConfigError(format!(
                "Embedding URL must be http(s), got '{}'",
                self.embedding.base_url
            )));
        }

        for pattern in &self.paths.exclude_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                PdfVecError::ConfigError(format!("Invalid exclude pattern '{pattern}': {e}"))
            })?;
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Input dir: {:?}", self.paths.input_dir);
        tracing::info!("  Output dir: {:?}", self.paths.output_dir);
        tracing::info!(
            "  Exclude patterns: {} patterns",
            self.paths.exclude_patterns.len()
        );
        tracing::info!("  Embedding URL: {}", self.embedding.base_url);
        tracing::info!("  Embedding model: {}", self.embedding.model);
        tracing::info!("  Task type: {}", self.embedding.task_type);
        tracing::info!("  Batch size: {}", self.embedding.batch_size);
        tracing::info!("  Request timeout: {}s", self.embedding.timeout_sec);
    }
}
