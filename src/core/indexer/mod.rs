//! Document indexing module.
//!
//! Turns a directory of PDFs into per-document vector indexes:
//!
//! - PDF text extraction
//! - Recursive character chunking with overlap
//! - Input directory listing with pattern matching
//! - Batch orchestration with per-file error isolation
//!
//! # Safety
//!
//! The chunker counts and slices by characters, never by raw byte
//! positions, so multi-byte text (emoji, CJK) cannot cause a panic.

pub mod chunker;
pub mod extractor;
pub mod pipeline;
pub mod walker;

pub use chunker::Chunker;
pub use extractor::{PdfExtractor, TextExtractor};
pub use pipeline::{run_batch, BatchEvent, DocumentFailure, IndexingPipeline};
pub use walker::FileWalker;
