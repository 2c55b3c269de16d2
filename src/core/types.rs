//! Core data types for pdfvec.
//!
//! Chunks and embeddings flow through the pipeline; the report
//! types describe the outcome of each file and of the whole batch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Embedding vector produced for a single chunk
pub type Embedding = Vec<f32>;

/// A single text chunk from a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The actual text content
    pub text: String,

    /// Byte offset where chunk starts in the extracted text
    pub start_offset: usize,

    /// Byte offset where chunk ends in the extracted text
    pub end_offset: usize,

    /// Sequential chunk number within the document
    pub chunk_index: usize,
}

/// Step of the per-document pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Loading,
    Chunking,
    Embedding,
    Indexing,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Loading => "loading",
            PipelineStage::Chunking => "chunking",
            PipelineStage::Embedding => "embedding",
            PipelineStage::Indexing => "indexing",
        };
        f.write_str(name)
    }
}

/// Statistics for one successfully indexed document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Index identifier derived from the file name (e.g. `report`)
    pub index_name: String,

    /// Directory the index was written to
    pub index_path: PathBuf,

    /// Number of chunks embedded and stored
    pub chunks_created: usize,

    /// Embedding dimension
    pub dimension: usize,

    /// Processing duration in milliseconds
    pub duration_ms: u64,
}

/// Outcome of processing a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Indexed(DocumentStats),
    Failed { stage: PipelineStage, error: String },
}

/// Per-file entry of a batch report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub file_name: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileReport {
    pub fn is_success(&self) -> bool {
        matches!(self.status, FileStatus::Indexed(_))
    }
}

/// Summary of a whole batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// PDF files found in the input directory
    pub files_found: usize,

    /// Files that produced an index
    pub files_indexed: usize,

    /// Files that failed at some stage
    pub files_failed: usize,

    /// Total chunks written across all indexes
    pub chunks_created: usize,

    /// Batch duration in milliseconds
    pub duration_ms: u64,

    /// Per-file outcomes in processing order
    pub files: Vec<FileReport>,
}

impl BatchSummary {
    /// Record a file outcome and update the counters
    pub fn record(&mut self, report: FileReport) {
        match &report.status {
            FileStatus::Indexed(stats) => {
                self.files_indexed += 1;
                self.chunks_created += stats.chunks_created;
            }
            FileStatus::Failed { .. } => self.files_failed += 1,
        }
        self.files.push(report);
    }
}
