//! Indexing pipeline orchestration.
//!
//! Coordinates the end-to-end batch workflow:
//! 1. Ensure the output directory exists
//! 2. List the PDF files of the input directory
//! 3. Per file: extract text, chunk, embed, build and save an index
//! 4. Report every outcome and a final summary
//!
//! A failing document never stops the batch; only configuration
//! problems, a missing credential and an unusable input or output
//! directory are fatal.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::core::config::Config;
use crate::core::embedding::{Embedder, GeminiEmbedder};
use crate::core::error::{PdfVecError, Result};
use crate::core::indexer::{Chunker, FileWalker, PdfExtractor, TextExtractor};
use crate::core::storage::{FlatIndexStore, IndexStore};
use crate::core::types::{
    BatchSummary, DocumentStats, FileReport, FileStatus, PipelineStage,
};

/// Progress notifications emitted by [`IndexingPipeline::index_directory`]
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// About to process `path` (`position` is 1-based)
    Started {
        path: &'a Path,
        position: usize,
        total: usize,
    },
    Indexed {
        file_name: &'a str,
        stats: &'a DocumentStats,
    },
    Failed {
        file_name: &'a str,
        failure: &'a DocumentFailure,
    },
    Complete(&'a BatchSummary),
}

/// Why a single document could not be indexed
#[derive(Debug)]
pub struct DocumentFailure {
    pub stage: PipelineStage,
    pub error: PdfVecError,
}

impl DocumentFailure {
    fn at(stage: PipelineStage) -> impl FnOnce(PdfVecError) -> Self {
        move |error| Self { stage, error }
    }
}

impl fmt::Display for DocumentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

/// Orchestrates the indexing pipeline
pub struct IndexingPipeline<X, E, S> {
    extractor: X,
    embedder: E,
    store: S,
    walker: FileWalker,
    chunker: Chunker,
}

impl<X, E, S> IndexingPipeline<X, E, S>
where
    X: TextExtractor,
    E: Embedder,
    S: IndexStore,
{
    /// Create a new indexing pipeline
    ///
    /// # Arguments
    ///
    /// * `extractor` - Text source for each document
    /// * `embedder` - Embedding backend
    /// * `store` - Index builder and writer
    /// * `exclude_patterns` - Glob patterns for file names to skip
    ///
    /// Chunking always uses the default size and overlap.
    pub fn new(extractor: X, embedder: E, store: S, exclude_patterns: Vec<String>) -> Result<Self> {
        let walker = FileWalker::new(exclude_patterns)?;

        Ok(Self {
            extractor,
            embedder,
            store,
            walker,
            chunker: Chunker::default(),
        })
    }

    /// Index every PDF directly inside `input`, one index per file
    /// under `output`.
    ///
    /// Errors reading or indexing individual files are reported
    /// through `on_event` and the summary but don't stop the process.
    ///
    /// # Errors
    ///
    /// `InvalidPath` if `output` cannot be created or `input` cannot
    /// be listed.
    pub fn index_directory<F>(&self, input: &Path, output: &Path, mut on_event: F) -> Result<BatchSummary>
    where
        F: FnMut(&BatchEvent<'_>),
    {
        let start = Instant::now();

        // Step 1: Output directory
        fs::create_dir_all(output).map_err(|e| {
            PdfVecError::InvalidPath(format!("Cannot create output directory {output:?}: {e}"))
        })?;

        // Step 2: Collect files
        tracing::info!("Starting file collection from {:?}", input);
        let files = self.walker.collect_files(input)?;
        tracing::info!("Found {} PDF files to index", files.len());

        let mut summary = BatchSummary {
            files_found: files.len(),
            ..BatchSummary::default()
        };

        // Step 3: One document at a time
        for (idx, path) in files.iter().enumerate() {
            on_event(&BatchEvent::Started {
                path,
                position: idx + 1,
                total: files.len(),
            });

            let file_name = display_name(path);

            let report = match self.index_document(path, output) {
                Ok(stats) => {
                    tracing::debug!(
                        "Indexed {:?} ({} chunks)",
                        path,
                        stats.chunks_created
                    );
                    on_event(&BatchEvent::Indexed {
                        file_name: &file_name,
                        stats: &stats,
                    });
                    FileReport {
                        file_name,
                        status: FileStatus::Indexed(stats),
                    }
                }
                Err(failure) => {
                    if failure.error.is_fatal_for_batch() {
                        tracing::error!(
                            "Failed to process {:?} during {}: {}",
                            path,
                            failure.stage,
                            failure.error
                        );
                    } else {
                        tracing::warn!(
                            "Failed to process {:?} during {}: {}",
                            path,
                            failure.stage,
                            failure.error
                        );
                    }
                    on_event(&BatchEvent::Failed {
                        file_name: &file_name,
                        failure: &failure,
                    });
                    FileReport {
                        file_name,
                        status: FileStatus::Failed {
                            stage: failure.stage,
                            error: failure.error.to_string(),
                        },
                    }
                }
            };

            summary.record(report);
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Batch complete: {} indexed, {} failed, {} chunks created in {}ms",
            summary.files_indexed,
            summary.files_failed,
            summary.chunks_created,
            summary.duration_ms
        );

        on_event(&BatchEvent::Complete(&summary));

        Ok(summary)
    }

    /// Run one document through all stages and write its index to
    /// `output/<file stem>`.
    pub fn index_document(
        &self,
        path: &Path,
        output: &Path,
    ) -> std::result::Result<DocumentStats, DocumentFailure> {
        let start = Instant::now();
        let file_name = display_name(path);
        let index_name = index_name(path);

        // Loading
        let text = self
            .extractor
            .extract_text(path)
            .map_err(DocumentFailure::at(PipelineStage::Loading))?;

        // Chunking
        if text.trim().is_empty() {
            return Err(DocumentFailure {
                stage: PipelineStage::Chunking,
                error: PdfVecError::ExtractionError(format!("{file_name}: no extractable text")),
            });
        }
        let chunks = self.chunker.chunk_text(&text);
        tracing::debug!("{}: {} chars, {} chunks", file_name, text.chars().count(), chunks.len());

        // Embedding
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self
            .embedder
            .embed(&texts)
            .map_err(DocumentFailure::at(PipelineStage::Embedding))?;

        // Indexing
        let chunks_created = chunks.len();
        let dimension = vectors.first().map(Vec::len).unwrap_or(0);
        let index_path = output.join(&index_name);

        let handle = self
            .store
            .build(&file_name, chunks, vectors)
            .map_err(DocumentFailure::at(PipelineStage::Indexing))?;
        self.store
            .save(&handle, &index_path)
            .map_err(DocumentFailure::at(PipelineStage::Indexing))?;

        Ok(DocumentStats {
            index_name,
            index_path,
            chunks_created,
            dimension,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Run a full batch with the production backends.
///
/// The credential is checked before any directory is touched: an
/// empty `api_key` fails with `AuthenticationError` and nothing is
/// created or listed.
pub fn run_batch<F>(settings: &Config, api_key: &str, on_event: F) -> Result<BatchSummary>
where
    F: FnMut(&BatchEvent<'_>),
{
    let embedder = GeminiEmbedder::new(api_key, &settings.embedding)?;
    let store = FlatIndexStore::new(embedder.model());

    let pipeline = IndexingPipeline::new(
        PdfExtractor::new(),
        embedder,
        store,
        settings.paths.exclude_patterns.clone(),
    )?;

    pipeline.index_directory(&settings.paths.input_dir, &settings.paths.output_dir, on_event)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// File name without its final extension (`report.v2.pdf` -> `report.v2`)
fn index_name(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| display_name(path))
}
