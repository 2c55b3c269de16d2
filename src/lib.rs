//! pdfvec - PDF to vector index batch tool
//!
//! Reads every PDF in an input directory, splits its text into
//! overlapping chunks, embeds the chunks with Google's Gemini
//! embedding API and writes one vector index per document.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg, logging
//!   - indexer (extraction, chunking, batch pipeline)
//!   - embedding (Gemini client)
//!   - storage (flat L2 index)
//!
//! - **cli**: Command-line front end (depends on core)

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{PdfVecError, Result};
pub use core::types::*;
