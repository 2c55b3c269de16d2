//! Vector index storage.
//!
//! An index pairs every chunk of one document with its embedding and
//! supports nearest-neighbour lookup. Backends implement
//! [`IndexStore`]; the pipeline never touches the on-disk format
//! directly.
//!
//! # Directory Structure
//!
//! ```text
//! {output_dir}/
//! ├── {document-name}/
//! │   ├── index.bin        # Vectors (bincode)
//! │   └── docstore.json    # Metadata and chunk texts
//! ```

mod flat;

pub use flat::{FlatIndex, FlatIndexStore, IndexMetadata, DOCSTORE_FILE, INDEX_FILE};

use crate::core::error::Result;
use crate::core::types::{Chunk, Embedding};
use std::path::Path;

/// Builds and persists per-document vector indexes.
pub trait IndexStore {
    /// In-memory index produced by [`IndexStore::build`]
    type Handle;

    /// Build an index from parallel chunk/vector lists.
    ///
    /// Fails with `IndexBuildError` when the lists differ in length,
    /// are empty, or the vectors do not share one dimension.
    fn build(&self, source: &str, chunks: Vec<Chunk>, vectors: Vec<Embedding>)
        -> Result<Self::Handle>;

    /// Write `handle` under `dir`, replacing any previous index there
    fn save(&self, handle: &Self::Handle, dir: &Path) -> Result<()>;
}

impl<S: IndexStore + ?Sized> IndexStore for &S {
    type Handle = S::Handle;

    fn build(
        &self,
        source: &str,
        chunks: Vec<Chunk>,
        vectors: Vec<Embedding>,
    ) -> Result<Self::Handle> {
        (**self).build(source, chunks, vectors)
    }

    fn save(&self, handle: &Self::Handle, dir: &Path) -> Result<()> {
        (**self).save(handle, dir)
    }
}
