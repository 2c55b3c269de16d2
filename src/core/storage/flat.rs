//! Exact (brute-force) L2 vector index.

use crate::core::error::{PdfVecError, Result};
use crate::core::storage::IndexStore;
use crate::core::types::{Chunk, Embedding};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Vector file name inside an index directory
pub const INDEX_FILE: &str = "index.bin";

/// Metadata and chunk file name inside an index directory
pub const DOCSTORE_FILE: &str = "docstore.json";

/// Bumped whenever the on-disk layout changes
pub const FORMAT_VERSION: u32 = 1;

const METRIC_L2: &str = "l2";

/// Descriptive metadata stored in `docstore.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub format_version: u32,
    pub source: String,
    pub model: String,
    pub dimension: usize,
    pub metric: String,
    pub created_at: DateTime<Utc>,
}

/// Contents of `index.bin`
#[derive(Debug, Serialize, Deserialize)]
struct VectorFile {
    dimension: usize,
    vectors: Vec<f32>,
}

/// Contents of `docstore.json`
#[derive(Debug, Serialize, Deserialize)]
struct DocStore {
    metadata: IndexMetadata,
    chunks: Vec<Chunk>,
}

/// In-memory flat index; vector `i` belongs to chunk `i`
#[derive(Debug, Clone)]
pub struct FlatIndex {
    metadata: IndexMetadata,
    chunks: Vec<Chunk>,
    /// Row-major, `chunks.len() * dimension` values
    vectors: Vec<f32>,
}

impl FlatIndex {
    pub fn metadata(&self) -> &IndexMetadata {
        &self.metadata
    }

    pub fn dimension(&self) -> usize {
        self.metadata.dimension
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Vector stored for chunk `position`
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        let dim = self.dimension();
        let start = position.checked_mul(dim)?;
        self.vectors.get(start..start + dim)
    }

    /// Return up to `k` `(position, squared distance)` pairs, nearest first.
    ///
    /// A query whose length differs from the index dimension matches
    /// nothing.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        let dim = self.dimension();
        if query.len() != dim || k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .chunks_exact(dim)
            .enumerate()
            .map(|(i, v)| (i, squared_l2(query, v)))
            .collect();

        scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        scored.truncate(k);
        scored
    }

    /// Write `index.bin` and `docstore.json` into `dir`.
    ///
    /// Both files are staged under temporary names first; an existing
    /// pair is only replaced once both encodings are on disk.
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| {
            PdfVecError::SerializationError(format!("Cannot create {dir:?}: {e}"))
        })?;

        let vector_file = VectorFile {
            dimension: self.dimension(),
            vectors: self.vectors.clone(),
        };
        let bytes = bincode::serialize(&vector_file)
            .map_err(|e| PdfVecError::SerializationError(format!("Encoding vectors: {e}")))?;

        let docstore = DocStore {
            metadata: self.metadata.clone(),
            chunks: self.chunks.clone(),
        };
        let json = serde_json::to_vec_pretty(&docstore)
            .map_err(|e| PdfVecError::SerializationError(format!("Encoding docstore: {e}")))?;

        let staged = [(INDEX_FILE, bytes), (DOCSTORE_FILE, json)];
        for (i, (name, contents)) in staged.iter().enumerate() {
            if let Err(e) = write_file(&staging_path(dir, name), contents) {
                for (written, _) in &staged[..=i] {
                    let _ = fs::remove_file(staging_path(dir, written));
                }
                return Err(e);
            }
        }
        for (name, _) in &staged {
            let target = dir.join(name);
            fs::rename(staging_path(dir, name), &target).map_err(|e| {
                PdfVecError::SerializationError(format!("Replacing {target:?}: {e}"))
            })?;
        }

        tracing::debug!(
            "Saved {} vectors (dim {}) to {:?}",
            self.len(),
            self.dimension(),
            dir
        );

        Ok(())
    }

    /// Read an index previously written by [`FlatIndex::save`]
    pub fn load(dir: &Path) -> Result<Self> {
        let bytes = fs::read(dir.join(INDEX_FILE))?;
        let vector_file: VectorFile = bincode::deserialize(&bytes).map_err(|e| {
            PdfVecError::IndexBuildError(format!("Corrupt {INDEX_FILE} in {dir:?}: {e}"))
        })?;

        let json = fs::read(dir.join(DOCSTORE_FILE))?;
        let docstore: DocStore = serde_json::from_slice(&json)?;

        if vector_file.dimension != docstore.metadata.dimension
            || vector_file.vectors.len() != docstore.chunks.len() * vector_file.dimension
        {
            return Err(PdfVecError::IndexBuildError(format!(
                "{INDEX_FILE} and {DOCSTORE_FILE} in {dir:?} disagree"
            )));
        }

        Ok(Self {
            metadata: docstore.metadata,
            chunks: docstore.chunks,
            vectors: vector_file.vectors,
        })
    }
}

/// [`IndexStore`] producing [`FlatIndex`] values
#[derive(Debug, Clone)]
pub struct FlatIndexStore {
    model: String,
}

impl FlatIndexStore {
    /// `model` is recorded in the metadata of every index built
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl IndexStore for FlatIndexStore {
    type Handle = FlatIndex;

    fn build(&self, source: &str, chunks: Vec<Chunk>, vectors: Vec<Embedding>) -> Result<FlatIndex> {
        if chunks.len() != vectors.len() {
            return Err(PdfVecError::IndexBuildError(format!(
                "{} chunks but {} vectors",
                chunks.len(),
                vectors.len()
            )));
        }

        let Some(first) = vectors.first() else {
            return Err(PdfVecError::IndexBuildError(
                "Cannot build an index without vectors".to_string(),
            ));
        };

        let dimension = first.len();
        if dimension == 0 {
            return Err(PdfVecError::IndexBuildError(
                "Vectors have zero dimension".to_string(),
            ));
        }

        let mut flat = Vec::with_capacity(dimension * vectors.len());
        for (i, v) in vectors.iter().enumerate() {
            if v.len() != dimension {
                return Err(PdfVecError::IndexBuildError(format!(
                    "Vector {i} has dimension {}, expected {dimension}",
                    v.len()
                )));
            }
            flat.extend_from_slice(v);
        }

        Ok(FlatIndex {
            metadata: IndexMetadata {
                format_version: FORMAT_VERSION,
                source: source.to_string(),
                model: self.model.clone(),
                dimension,
                metric: METRIC_L2.to_string(),
                created_at: Utc::now(),
            },
            chunks,
            vectors: flat,
        })
    }

    fn save(&self, handle: &FlatIndex, dir: &Path) -> Result<()> {
        handle.save(dir)
    }
}

fn staging_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.tmp"))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)
        .map_err(|e| PdfVecError::SerializationError(format!("Writing {path:?}: {e}")))
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
