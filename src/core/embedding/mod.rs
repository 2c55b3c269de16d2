//! Embedding providers.
//!
//! The pipeline only depends on the [`Embedder`] trait; the Gemini
//! client is the production implementation.

mod gemini;

pub use gemini::GeminiEmbedder;

use crate::core::error::Result;
use crate::core::types::Embedding;

/// Maps chunk texts to embedding vectors.
///
/// Implementations must return exactly one vector per input, in
/// input order.
pub trait Embedder {
    /// Model identifier recorded alongside stored vectors
    fn model(&self) -> &str;

    /// Embed `texts`, returning `texts.len()` vectors
    fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>>;
}

impl<E: Embedder + ?Sized> Embedder for &E {
    fn model(&self) -> &str {
        (**self).model()
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        (**self).embed(texts)
    }
}
