// Gemini embedding client tests
//
// Exercises batching, ordering, request shape and error mapping over
// real HTTP against `EmbeddingServer`.

use crate::common::EmbeddingServer;
use pdfvec::core::config::EmbeddingConfig;
use pdfvec::core::embedding::{Embedder, GeminiEmbedder};
use pdfvec::core::error::PdfVecError;

fn settings(base_url: &str) -> EmbeddingConfig {
    EmbeddingConfig {
        base_url: base_url.to_string(),
        timeout_sec: 5,
        ..EmbeddingConfig::default()
    }
}

fn texts(count: usize) -> Vec<String> {
    (1..=count).map(|n| "x".repeat(n)).collect()
}

#[test]
fn test_large_input_split_into_batches() {
    let server = EmbeddingServer::start(16);
    let embedder = GeminiEmbedder::new("test-key", &settings(&server.base_url)).unwrap();

    let vectors = embedder.embed(&texts(250)).unwrap();

    assert_eq!(vectors.len(), 250);
    for (i, v) in vectors.iter().enumerate() {
        assert_eq!(v.len(), 16);
        assert_eq!(v[0], (i + 1) as f32, "vector {i} out of order");
    }

    let sizes: Vec<usize> = server
        .requests()
        .iter()
        .map(|r| r.body["requests"].as_array().unwrap().len())
        .collect();
    assert_eq!(sizes, vec![100, 100, 50]);
}

#[test]
fn test_request_shape() {
    let server = EmbeddingServer::start(4);
    let embedder = GeminiEmbedder::new("secret-123", &settings(&server.base_url)).unwrap();

    embedder.embed(&["hello".to_string()]).unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);

    let head = requests[0].head.to_lowercase();
    assert!(head.starts_with("post /v1beta/models/embedding-001:batchembedcontents "));
    assert!(head.contains("x-goog-api-key: secret-123"));
    assert!(!head.contains("key=secret-123"));

    let entry = &requests[0].body["requests"][0];
    assert_eq!(entry["model"], "models/embedding-001");
    assert_eq!(entry["taskType"], "RETRIEVAL_DOCUMENT");
    assert_eq!(entry["content"]["parts"][0]["text"], "hello");
}

#[test]
fn test_custom_model_and_batch_size() {
    let server = EmbeddingServer::start(4);
    let config = EmbeddingConfig {
        model: "text-embedding-004".to_string(),
        batch_size: 3,
        ..settings(&server.base_url)
    };
    let embedder = GeminiEmbedder::new("k", &config).unwrap();

    assert_eq!(embedder.model(), "models/text-embedding-004");

    embedder.embed(&texts(7)).unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[0]
        .head
        .contains("/v1beta/models/text-embedding-004:batchEmbedContents"));
}

#[test]
fn test_forbidden_is_authentication_error() {
    let server = EmbeddingServer::failing("403 Forbidden", "Permission denied");
    let embedder = GeminiEmbedder::new("bad-key", &settings(&server.base_url)).unwrap();

    let err = embedder.embed(&texts(1)).unwrap_err();

    assert!(matches!(err, PdfVecError::AuthenticationError(_)));
    assert!(err.to_string().contains("Permission denied"));
}

#[test]
fn test_invalid_key_400_is_authentication_error() {
    let server = EmbeddingServer::failing(
        "400 Bad Request",
        "API key not valid. Please pass a valid API key.",
    );
    let embedder = GeminiEmbedder::new("bad-key", &settings(&server.base_url)).unwrap();

    let err = embedder.embed(&texts(1)).unwrap_err();

    assert!(err.is_credential_error());
}

#[test]
fn test_server_error_is_service_error_without_retry() {
    let server = EmbeddingServer::failing("500 Internal Server Error", "backend unavailable");
    let embedder = GeminiEmbedder::new("k", &settings(&server.base_url)).unwrap();

    let err = embedder.embed(&texts(150)).unwrap_err();

    assert!(matches!(err, PdfVecError::ServiceError(_)));
    assert_eq!(server.requests().len(), 1);
}

#[test]
fn test_empty_input_sends_nothing() {
    let server = EmbeddingServer::start(4);
    let embedder = GeminiEmbedder::new("k", &settings(&server.base_url)).unwrap();

    let vectors = embedder.embed(&[]).unwrap();

    assert!(vectors.is_empty());
    assert!(server.requests().is_empty());
}
