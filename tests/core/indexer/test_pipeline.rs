// Batch pipeline tests with in-memory backends
//
// The extractor reads plain text and the embedder is deterministic,
// so the whole loop runs without PDFs or network access while the
// real flat index store writes to disk.

use crate::common::{assert_valid_summary, HashEmbedder, PdfDir, PlainTextExtractor, CORRUPT_MARKER};
use pdfvec::core::indexer::{BatchEvent, IndexingPipeline};
use pdfvec::core::storage::{FlatIndex, FlatIndexStore};
use pdfvec::core::types::{FileStatus, PipelineStage};
use std::fs;

fn run(fixture: &PdfDir, extractor: &PlainTextExtractor, embedder: &HashEmbedder) -> pdfvec::BatchSummary {
    let pipeline = IndexingPipeline::new(
        extractor,
        embedder,
        FlatIndexStore::new("test/hash"),
        vec![],
    )
    .unwrap();

    pipeline
        .index_directory(&fixture.input(), &fixture.output(), |_| {})
        .unwrap()
}

#[test]
fn test_indexes_only_pdf_files() {
    let fixture = PdfDir::small();
    let extractor = PlainTextExtractor::default();
    let embedder = HashEmbedder::new(4);

    let summary = run(&fixture, &extractor, &embedder);

    assert_valid_summary(&summary);
    assert_eq!(summary.files_found, 3);
    assert_eq!(summary.files_indexed, 3);

    let opened = extractor.opened.borrow();
    assert_eq!(opened.len(), 3);
    assert!(opened.iter().all(|p| !p.ends_with("readme.txt")));

    for name in ["alpha", "beta", "gamma"] {
        assert!(fixture.output().join(name).is_dir(), "missing index for {name}");
    }
    assert!(!fixture.output().join("readme").exists());
}

#[test]
fn test_stored_vectors_match_chunks() {
    let fixture = PdfDir::small();
    let embedder = HashEmbedder::new(4);

    run(&fixture, &PlainTextExtractor::default(), &embedder);

    let index = FlatIndex::load(&fixture.output().join("alpha")).unwrap();
    assert_eq!(index.metadata().source, "alpha.pdf");
    assert_eq!(index.metadata().model, "test/hash");
    assert_eq!(index.dimension(), 4);

    for (i, chunk) in index.chunks().iter().enumerate() {
        assert_eq!(index.vector(i).unwrap(), embedder.vector_for(&chunk.text).as_slice());
    }
}

#[test]
fn test_corrupt_file_does_not_stop_batch() {
    let fixture = PdfDir::with_files(&[
        ("a.pdf", CORRUPT_MARKER),
        ("b.pdf", "Readable text."),
        ("c.pdf", "More readable text."),
    ]);

    let summary = run(&fixture, &PlainTextExtractor::default(), &HashEmbedder::new(3));

    assert_valid_summary(&summary);
    assert_eq!(summary.files_indexed, 2);
    assert_eq!(summary.files_failed, 1);
    match &summary.files[0].status {
        FileStatus::Failed { stage, error } => {
            assert_eq!(*stage, PipelineStage::Loading);
            assert!(error.contains("unreadable"));
        }
        other => panic!("a.pdf should have failed, got {other:?}"),
    }
    assert!(!fixture.output().join("a").exists());
    assert!(fixture.output().join("b").exists());
    assert!(fixture.output().join("c").exists());
}

#[test]
fn test_long_document_produces_overlapping_chunks() {
    let fixture = PdfDir::long_document(60);
    let embedder = HashEmbedder::new(2);

    let summary = run(&fixture, &PlainTextExtractor::default(), &embedder);

    assert_eq!(summary.files_indexed, 1);
    assert!(summary.chunks_created > 1);
    assert_eq!(embedder.calls.get(), 1);

    let index = FlatIndex::load(&fixture.output().join("long")).unwrap();
    assert_eq!(index.len(), summary.chunks_created);
    for pair in index.chunks().windows(2) {
        assert!(pair[1].start_offset < pair[0].end_offset);
        assert!(pair[0].text.chars().count() <= 10_000);
    }

    let query = index.vector(1).unwrap().to_vec();
    let hits = index.search(&query, 3);
    assert_eq!(hits[0].1, 0.0);
}

#[test]
fn test_unicode_content_preserved() {
    let fixture = PdfDir::with_files(&[(
        "unicode.pdf",
        "中文内容 with emoji 🦀🎉 and עברית.\n\nSecond paragraph: русский.",
    )]);

    run(&fixture, &PlainTextExtractor::default(), &HashEmbedder::new(2));

    let index = FlatIndex::load(&fixture.output().join("unicode")).unwrap();
    let all_text: String = index.chunks().iter().map(|c| c.text.as_str()).collect();
    assert!(all_text.contains("中文"));
    assert!(all_text.contains("🦀"));
    assert!(all_text.contains("русский"));
}

#[test]
fn test_exclude_patterns_skip_files() {
    let fixture = PdfDir::small();
    let extractor = PlainTextExtractor::default();
    let pipeline = IndexingPipeline::new(
        &extractor,
        HashEmbedder::new(2),
        FlatIndexStore::new("test/hash"),
        vec!["beta*".to_string()],
    )
    .unwrap();

    let summary = pipeline
        .index_directory(&fixture.input(), &fixture.output(), |_| {})
        .unwrap();

    assert_eq!(summary.files_found, 2);
    assert!(!fixture.output().join("beta").exists());
}

#[test]
fn test_rerun_overwrites_existing_index() {
    let fixture = PdfDir::with_files(&[("doc.pdf", "first version")]);
    run(&fixture, &PlainTextExtractor::default(), &HashEmbedder::new(2));

    fs::write(fixture.input().join("doc.pdf"), "second version").unwrap();
    run(&fixture, &PlainTextExtractor::default(), &HashEmbedder::new(2));

    let index = FlatIndex::load(&fixture.output().join("doc")).unwrap();
    assert_eq!(index.chunks()[0].text, "second version");
}

#[test]
fn test_events_reported_for_every_file() {
    let fixture = PdfDir::with_files(&[("a.pdf", CORRUPT_MARKER), ("b.pdf", "ok")]);
    let extractor = PlainTextExtractor::default();
    let pipeline = IndexingPipeline::new(
        &extractor,
        HashEmbedder::new(2),
        FlatIndexStore::new("test/hash"),
        vec![],
    )
    .unwrap();

    let mut started = 0;
    let mut indexed = Vec::new();
    let mut failed = Vec::new();
    let mut completed = false;

    pipeline
        .index_directory(&fixture.input(), &fixture.output(), |event| match event {
            BatchEvent::Started { total, .. } => {
                assert_eq!(*total, 2);
                started += 1;
            }
            BatchEvent::Indexed { file_name, .. } => indexed.push(file_name.to_string()),
            BatchEvent::Failed { file_name, failure } => {
                assert_eq!(failure.stage, PipelineStage::Loading);
                failed.push(file_name.to_string());
            }
            BatchEvent::Complete(summary) => {
                assert_eq!(summary.files_found, 2);
                completed = true;
            }
        })
        .unwrap();

    assert_eq!(started, 2);
    assert_eq!(indexed, vec!["b.pdf"]);
    assert_eq!(failed, vec!["a.pdf"]);
    assert!(completed);
}

#[test]
fn test_index_document_single_file() {
    let fixture = PdfDir::with_files(&[("single.pdf", "Just one short document.")]);
    let pipeline = IndexingPipeline::new(
        PlainTextExtractor::default(),
        HashEmbedder::new(5),
        FlatIndexStore::new("test/hash"),
        vec![],
    )
    .unwrap();

    let stats = pipeline
        .index_document(&fixture.files[0], &fixture.output())
        .unwrap();

    assert_eq!(stats.index_name, "single");
    assert_eq!(stats.index_path, fixture.output().join("single"));
    assert_eq!(stats.chunks_created, 1);
    assert_eq!(stats.dimension, 5);
}
