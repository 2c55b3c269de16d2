//! Google Generative Language embedding client.
//!
//! Blocking client for the `batchEmbedContents` endpoint. Inputs are
//! sent in sequential batches and the vectors are returned in input
//! order. Failures are not retried.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::core::config::{EmbeddingConfig, MAX_EMBED_BATCH_SIZE};
use crate::core::embedding::Embedder;
use crate::core::error::{PdfVecError, Result};
use crate::core::types::Embedding;

/// Header carrying the API key (keeps the key out of request URLs)
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Blocking embeddings client for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    task_type: String,
    batch_size: usize,
}

impl GeminiEmbedder {
    /// Build a client from the embedding settings and an API key.
    ///
    /// # Errors
    ///
    /// `AuthenticationError` if the key is empty or not a valid header
    /// value, `ConfigError` if the batch size is out of range.
    pub fn new(api_key: &str, settings: &EmbeddingConfig) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(PdfVecError::AuthenticationError(
                "API key is required".to_string(),
            ));
        }

        if settings.batch_size == 0 || settings.batch_size > MAX_EMBED_BATCH_SIZE {
            return Err(PdfVecError::ConfigError(format!(
                "Embedding batch size must be between 1 and {MAX_EMBED_BATCH_SIZE}, got {}",
                settings.batch_size
            )));
        }

        let mut key = HeaderValue::from_str(api_key).map_err(|_| {
            PdfVecError::AuthenticationError("API key contains invalid characters".to_string())
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_sec))
            .default_headers(headers)
            .build()
            .map_err(|e| PdfVecError::ServiceError(format!("Failed to build HTTP client: {e}")))?;

        let model = qualified_model(&settings.model);
        let endpoint = format!(
            "{}/{}:batchEmbedContents",
            settings.base_url.trim_end_matches('/'),
            model
        );

        Ok(Self {
            client,
            endpoint,
            model,
            task_type: settings.task_type.clone(),
            batch_size: settings.batch_size,
        })
    }

    /// Endpoint URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Maximum number of texts per request
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn embed_batch(&self, batch: &[String]) -> Result<Vec<Embedding>> {
        let request = BatchEmbedRequest {
            requests: batch
                .iter()
                .map(|text| EmbedContentRequest {
                    model: &self.model,
                    content: Content {
                        parts: vec![Part { text }],
                    },
                    task_type: &self.task_type,
                })
                .collect(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(|e| {
                PdfVecError::ServiceError(format!("Request to embedding service failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(classify_failure(status, &body));
        }

        let parsed: BatchEmbedResponse = response.json().map_err(|e| {
            PdfVecError::ServiceError(format!("Failed to parse embedding response: {e}"))
        })?;

        if parsed.embeddings.len() != batch.len() {
            return Err(PdfVecError::ServiceError(format!(
                "Embedding service returned {} vectors for {} inputs",
                parsed.embeddings.len(),
                batch.len()
            )));
        }

        Ok(parsed.embeddings.into_iter().map(|e| e.values).collect())
    }
}

impl Embedder for GeminiEmbedder {
    fn model(&self) -> &str {
        &self.model
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let mut vectors = Vec::with_capacity(texts.len());

        for (i, batch) in texts.chunks(self.batch_size).enumerate() {
            tracing::debug!(
                "Embedding batch {} ({} texts) with {}",
                i + 1,
                batch.len(),
                self.model
            );
            vectors.extend(self.embed_batch(batch)?);
        }

        check_dimensions(&vectors)?;

        Ok(vectors)
    }
}

/// Prefix bare model names with `models/`
fn qualified_model(model: &str) -> String {
    let model = model.trim();
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

/// Map a non-success response to an error kind
fn classify_failure(status: StatusCode, body: &str) -> PdfVecError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    let rejected_key = status == StatusCode::BAD_REQUEST
        && (body.contains("API_KEY_INVALID") || body.contains("API key not valid"));

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN || rejected_key {
        PdfVecError::AuthenticationError(format!("{status}: {message}"))
    } else {
        PdfVecError::ServiceError(format!("{status}: {message}"))
    }
}

/// All vectors of one call must share a non-zero dimension
fn check_dimensions(vectors: &[Embedding]) -> Result<()> {
    let Some(first) = vectors.first() else {
        return Ok(());
    };

    let dimension = first.len();
    if dimension == 0 {
        return Err(PdfVecError::ServiceError(
            "Embedding service returned empty vectors".to_string(),
        ));
    }

    if let Some(position) = vectors.iter().position(|v| v.len() != dimension) {
        return Err(PdfVecError::ServiceError(format!(
            "Vector {position} has dimension {} (expected {dimension})",
            vectors[position].len()
        )));
    }

    Ok(())
}

#[derive(Serialize)]
struct BatchEmbedRequest<'a> {
    requests: Vec<EmbedContentRequest<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: &'a str,
    content: Content<'a>,
    task_type: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    #[serde(default)]
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
