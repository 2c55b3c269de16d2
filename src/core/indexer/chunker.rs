//! Recursive separator-based text chunking.
//!
//! Text is first cut into pieces along the most natural boundary it
//! contains (paragraph, then line, then word, then a hard character
//! cut), and pieces are then packed greedily into chunks. Every chunk
//! after the first starts with the trailing `overlap` characters of
//! the chunk before it.
//!
//! All sizes are measured in **characters**, not bytes, and every
//! boundary falls on a valid UTF-8 boundary.
//!
//! # Example
//!
//! ```
//! use pdfvec::core::indexer::Chunker;
//!
//! let chunker = Chunker::new(12, 3).unwrap();
//! let chunks = chunker.chunk_text("first paragraph\n\nsecond one");
//!
//! for pair in chunks.windows(2) {
//!     let tail: String = pair[0].text.chars().rev().take(3).collect::<Vec<_>>()
//!         .into_iter().rev().collect();
//!     assert!(pair[1].text.starts_with(&tail));
//! }
//! ```

use crate::core::error::{PdfVecError, Result};
use crate::core::types::Chunk;

/// Target chunk size used by the batch pipeline
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Overlap between consecutive chunks used by the batch pipeline
pub const DEFAULT_CHUNK_OVERLAP: usize = 1_000;

/// Separators in order of preference. The empty separator is a hard
/// character cut and always applies.
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Contiguous byte range of the source text with its character length
#[derive(Debug, Clone, Copy)]
struct Piece {
    start: usize,
    end: usize,
    chars: usize,
}

/// Recursive text chunker with character overlap.
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Maximum number of characters per chunk
    chunk_size: usize,

    /// Number of characters repeated between consecutive chunks
    overlap: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl Chunker {
    /// Create a new chunker.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `chunk_size` is 0 or if
    /// `overlap >= chunk_size`.
    ///
    /// # Example
    ///
    /// ```
    /// use pdfvec::core::indexer::Chunker;
    ///
    /// let chunker = Chunker::new(512, 64).unwrap();
    /// assert_eq!(chunker.chunk_size(), 512);
    /// assert!(Chunker::new(64, 64).is_err());
    /// ```
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(PdfVecError::ConfigError(
                "chunk_size must be > 0".to_string(),
            ));
        }

        if overlap >= chunk_size {
            return Err(PdfVecError::ConfigError(format!(
                "overlap ({overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Get the chunk size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the overlap size in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// New characters contributed by each chunk after the first.
    fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// Split text into ordered, overlapping chunks.
    ///
    /// Returns an empty vector for empty input. For non-empty input
    /// the chunks cover the whole text: dropping the first `overlap`
    /// characters of every chunk after the first and concatenating
    /// yields the input exactly.
    ///
    /// Pieces are re-split with the next separator once they exceed the
    /// stride (`chunk_size - overlap`), not `chunk_size`: with the
    /// defaults a 9,500-character paragraph is cut at line or word
    /// boundaries so the overlap tail still fits in the next chunk.
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut pieces = Vec::new();
        self.split_recursive(text, 0, &DEFAULT_SEPARATORS, &mut pieces);

        self.merge_pieces(text, &pieces)
    }

    /// Cut `text` (located at byte `base` of the source) into pieces no
    /// longer than the stride, preferring earlier separators.
    fn split_recursive(&self, text: &str, base: usize, separators: &[&str], out: &mut Vec<Piece>) {
        let Some(position) = separators
            .iter()
            .position(|sep| sep.is_empty() || text.contains(sep))
        else {
            out.push(Piece {
                start: base,
                end: base + text.len(),
                chars: text.chars().count(),
            });
            return;
        };

        let remaining = &separators[position + 1..];

        for (start, end) in split_keeping_separator(text, separators[position]) {
            let piece = &text[start..end];
            let chars = piece.chars().count();

            if chars <= self.stride() || remaining.is_empty() {
                out.push(Piece {
                    start: base + start,
                    end: base + end,
                    chars,
                });
            } else {
                self.split_recursive(piece, base + start, remaining, out);
            }
        }
    }

    /// Pack pieces greedily into chunks of at most `chunk_size`
    /// characters, seeding each new chunk with the overlap tail.
    fn merge_pieces(&self, text: &str, pieces: &[Piece]) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        let Some(first) = pieces.first() else {
            return chunks;
        };

        let mut start = first.start;
        let mut end = first.start;
        let mut len = 0;

        for piece in pieces {
            if len > 0 && len + piece.chars > self.chunk_size {
                push_chunk(text, start, end, &mut chunks);

                // A closed chunk is always longer than the overlap since
                // no piece exceeds the stride.
                start = self.overlap_start(text, start, end);
                len = self.overlap.min(len);
            }

            end = piece.end;
            len += piece.chars;
        }

        if end > start {
            push_chunk(text, start, end, &mut chunks);
        }

        chunks
    }

    /// Byte offset where the trailing `overlap` characters of
    /// `text[start..end]` begin.
    fn overlap_start(&self, text: &str, start: usize, end: usize) -> usize {
        if self.overlap == 0 {
            return end;
        }

        text[start..end]
            .char_indices()
            .rev()
            .nth(self.overlap - 1)
            .map(|(offset, _)| start + offset)
            .unwrap_or(start)
    }
}

fn push_chunk(text: &str, start: usize, end: usize, chunks: &mut Vec<Chunk>) {
    chunks.push(Chunk {
        text: text[start..end].to_string(),
        start_offset: start,
        end_offset: end,
        chunk_index: chunks.len(),
    });
}

/// Split `text` on `separator`, attaching each separator to the start
/// of the piece that follows it. Returned byte ranges are contiguous
/// and cover the whole input.
fn split_keeping_separator(text: &str, separator: &str) -> Vec<(usize, usize)> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| (i, i + c.len_utf8()))
            .collect();
    }

    let mut bounds = Vec::new();
    let mut start = 0;

    for (position, _) in text.match_indices(separator) {
        if position > start {
            bounds.push((start, position));
            start = position;
        }
    }

    if start < text.len() {
        bounds.push((start, text.len()));
    }

    bounds
}
