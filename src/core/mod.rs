//! Core domain logic (front-end agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Chunks, embeddings and batch reports
//! - **xdg**: XDG directory handling
//! - **logging**: Tracing subscriber setup
//! - **indexer**: Extraction, chunking and the batch pipeline
//! - **embedding**: Embedding providers (Gemini)
//! - **storage**: Flat vector index persistence

pub mod config;
pub mod embedding;
pub mod error;
pub mod indexer;
pub mod logging;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{PdfVecError, Result};
