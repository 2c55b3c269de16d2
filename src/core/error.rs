//! Error types and error handling for pdfvec.
//!
//! A single error enum covers every stage of the pipeline. The
//! batch driver turns most of these into per-file failures; only
//! credential and setup errors abort a run.

use thiserror::Error;

/// Result type alias for pdfvec operations
pub type Result<T> = std::result::Result<T, PdfVecError>;

/// Main error type for pdfvec
#[derive(Error, Debug)]
pub enum PdfVecError {
    #[error("Extraction failed: {0}")]
    ExtractionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Embedding service error: {0}")]
    ServiceError(String),

    #[error("Failed to write index: {0}")]
    SerializationError(String),

    #[error("Failed to build index: {0}")]
    IndexBuildError(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl PdfVecError {
    /// Check if this error is caused by a missing or rejected credential
    pub fn is_credential_error(&self) -> bool {
        matches!(self, PdfVecError::AuthenticationError(_))
    }

    /// Check if this error should stop the whole batch instead of a
    /// single file
    pub fn is_fatal_for_batch(&self) -> bool {
        matches!(
            self,
            PdfVecError::AuthenticationError(_)
                | PdfVecError::ConfigError(_)
                | PdfVecError::InvalidPath(_)
                | PdfVecError::TomlError(_)
        )
    }
}
