// Résumé storage: fetching previously uploaded résumés by URL.
// Uploading is handled by the application layer; this side only reads.

pub mod fetch;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use fetch::BlobFetcher;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unsupported resume URL '{0}'")]
    UnsupportedUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("resume URL returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("S3 error: {0}")]
    S3(String),
}

/// A résumé pulled from storage, with the file name its URL declares.
#[derive(Debug, Clone)]
pub struct FetchedResume {
    pub bytes: Bytes,
    pub file_name: String,
}

#[async_trait]
pub trait ResumeFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedResume, FetchError>;
}
