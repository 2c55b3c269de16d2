//! PDF text extraction.
//!
//! Reads a PDF from disk and concatenates the text of all pages in
//! page order. No separator is inserted between pages, so a chunk
//! may span a page break.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::core::error::{PdfVecError, Result};

/// Source of raw document text
pub trait TextExtractor {
    /// Extract the full text of the document at `path`
    fn extract_text(&self, path: &Path) -> Result<String>;
}

impl<X: TextExtractor + ?Sized> TextExtractor for &X {
    fn extract_text(&self, path: &Path) -> Result<String> {
        (**self).extract_text(path)
    }
}

/// `TextExtractor` backed by the `pdf-extract` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfExtractor {
    fn extract_text(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)
            .map_err(|e| PdfVecError::ExtractionError(format!("Failed to read {path:?}: {e}")))?;

        extract_from_bytes(&bytes)
            .map_err(|e| PdfVecError::ExtractionError(format!("{path:?}: {e}")))
    }
}

/// Extract page texts from an in-memory PDF and join them.
///
/// The parser can panic on malformed input; the panic is contained
/// here so it only fails the current document.
fn extract_from_bytes(bytes: &[u8]) -> std::result::Result<String, String> {
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| "PDF parser aborted on malformed input".to_string())?
    .map_err(|e| format!("not a valid PDF ({e})"))?;

    tracing::debug!("Extracted {} page(s)", pages.len());

    Ok(pages.concat())
}
