// Batch entry point tests with the production backends
//
// The Gemini client talks to a local stub server; the input files are
// not real PDFs, so extraction is the stage that fails.

use crate::common::{assert_valid_summary, test_config, EmbeddingServer, PdfDir};
use pdfvec::core::error::PdfVecError;
use pdfvec::core::indexer::run_batch;
use pdfvec::core::storage::FlatIndex;
use pdfvec::core::types::{FileStatus, PipelineStage};

#[test]
fn test_empty_credential_touches_nothing() {
    let fixture = PdfDir::small();
    let server = EmbeddingServer::start(8);
    let config = test_config(&fixture, &server.base_url);

    let mut events = 0;
    let result = run_batch(&config, "", |_| events += 1);

    assert!(matches!(result, Err(PdfVecError::AuthenticationError(_))));
    assert_eq!(events, 0);
    assert!(!fixture.output().exists());
    assert!(server.requests().is_empty());
}

#[test]
fn test_whitespace_credential_is_empty() {
    let fixture = PdfDir::small();
    let config = test_config(&fixture, "http://127.0.0.1:9/v1beta");

    let err = run_batch(&config, "   ", |_| {}).unwrap_err();

    assert!(err.is_credential_error());
    assert!(!fixture.output().exists());
}

#[test]
fn test_unparsable_pdfs_fail_at_loading() {
    let fixture = PdfDir::small();
    let server = EmbeddingServer::start(8);
    let config = test_config(&fixture, &server.base_url);

    let summary = run_batch(&config, "test-key", |_| {}).unwrap();

    assert_valid_summary(&summary);
    assert_eq!(summary.files_found, 3);
    assert_eq!(summary.files_failed, 3);
    assert!(summary.files.iter().all(|f| matches!(
        f.status,
        FileStatus::Failed {
            stage: PipelineStage::Loading,
            ..
        }
    )));
    assert!(fixture.output().is_dir());
    assert!(server.requests().is_empty());
}

#[test]
fn test_real_pdf_indexed_end_to_end() {
    let fixture = PdfDir::with_pdf("report.pdf", &["Quarterly results", "Outlook for next year"]);
    let server = EmbeddingServer::start(8);
    let config = test_config(&fixture, &server.base_url);

    let summary = run_batch(&config, "test-key", |_| {}).unwrap();

    assert_valid_summary(&summary);
    assert_eq!(summary.files_indexed, 1);
    assert_eq!(server.requests().len(), 1);

    let index = FlatIndex::load(&fixture.output().join("report")).unwrap();
    assert_eq!(index.metadata().source, "report.pdf");
    assert_eq!(index.dimension(), 8);
    let text: String = index.chunks().iter().map(|c| c.text.as_str()).collect();
    let first = text.find("Quarterly results").unwrap();
    let second = text.find("Outlook for next year").unwrap();
    assert!(first < second);
}

#[test]
fn test_missing_input_directory_is_fatal() {
    let fixture = PdfDir::small();
    let server = EmbeddingServer::start(8);
    let mut config = test_config(&fixture, &server.base_url);
    config.paths.input_dir = fixture.path().join("does-not-exist");

    let result = run_batch(&config, "test-key", |_| {});

    assert!(matches!(result, Err(PdfVecError::InvalidPath(_))));
}

#[test]
fn test_invalid_exclude_pattern_is_config_error() {
    let fixture = PdfDir::small();
    let mut config = test_config(&fixture, "http://127.0.0.1:9/v1beta");
    config.paths.exclude_patterns = vec!["[broken".to_string()];

    let result = run_batch(&config, "test-key", |_| {});

    assert!(matches!(result, Err(PdfVecError::ConfigError(_))));
    assert!(!fixture.output().exists());
}
