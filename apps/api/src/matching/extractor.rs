//! Document text extraction.
//!
//! PDFs go to a `TextExtractor` backend; everything else is skipped and reported as
//! `ExtractedText::Skipped`. Non-PDF résumés are accepted for applications but never scored.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extractor credentials are not configured")]
    MissingCredentials,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("extractor returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("local PDF extraction failed: {0}")]
    Local(String),
}

/// A résumé as handed over by the request layer. `declared_name` is only used
/// to sniff the extension.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    pub bytes: Bytes,
    pub declared_name: String,
}

impl DocumentInput {
    pub fn new(bytes: impl Into<Bytes>, declared_name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            declared_name: declared_name.into(),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.declared_name.to_ascii_lowercase().ends_with(".pdf")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotPdf,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotPdf => f.write_str("Non-PDF resume uploaded"),
        }
    }
}

/// Result of running a document through extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedText {
    Text(String),
    Skipped(SkipReason),
}

/// A PDF-to-text backend. Carried as `Arc<dyn TextExtractor>`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_pdf(&self, pdf: Bytes) -> Result<String, ExtractionError>;
}

/// Routes a document by extension: PDFs are extracted, anything else is skipped
/// without touching the extractor.
pub async fn extract_text(
    extractor: &dyn TextExtractor,
    document: &DocumentInput,
) -> Result<ExtractedText, ExtractionError> {
    if !document.is_pdf() {
        info!(
            "Skipping extraction for non-PDF resume '{}'",
            document.declared_name
        );
        return Ok(ExtractedText::Skipped(SkipReason::NotPdf));
    }

    let text = extractor.extract_pdf(document.bytes.clone()).await?;
    debug!(
        "Extracted {} chars from '{}'",
        text.len(),
        document.declared_name
    );
    Ok(ExtractedText::Text(text))
}

// ────────────────────────────────────────────────────────────────────────────
// RemotePdfExtractor — external extraction service
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ExtractionResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExtractorErrorBody {
    message: String,
}

/// Calls an external PDF-to-text service: raw bytes in, `{"text": ...}` out.
/// One attempt per call; failures propagate to the caller.
#[derive(Clone)]
pub struct RemotePdfExtractor {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemotePdfExtractor {
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ExtractionError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl TextExtractor for RemotePdfExtractor {
    async fn extract_pdf(&self, pdf: Bytes) -> Result<String, ExtractionError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ExtractionError::MissingCredentials)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header(CONTENT_TYPE, "application/pdf")
            .body(pdf)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ExtractorErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(ExtractionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ExtractionResponse = response.json().await?;
        Ok(parsed.text.unwrap_or_default())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LocalPdfExtractor — in-process fallback
// ────────────────────────────────────────────────────────────────────────────

/// Extracts text in-process with `pdf-extract` on the blocking pool.
pub struct LocalPdfExtractor;

#[async_trait]
impl TextExtractor for LocalPdfExtractor {
    async fn extract_pdf(&self, pdf: Bytes) -> Result<String, ExtractionError> {
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
            .await
            .map_err(|e| ExtractionError::Local(e.to_string()))?
            .map_err(|e| ExtractionError::Local(e.to_string()))
    }
}
