use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use reqwest::{Client, Url};
use tracing::{debug, info};

use super::{FetchError, FetchedResume, ResumeFetcher};

/// Fetches stored résumés over `http(s)://` or, when an S3 client is attached,
/// from `s3://bucket/key`.
#[derive(Clone)]
pub struct BlobFetcher {
    http: Client,
    s3: Option<S3Client>,
}

impl BlobFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            s3: None,
        })
    }

    pub fn with_s3(mut self, s3: S3Client) -> Self {
        self.s3 = Some(s3);
        self
    }

    async fn fetch_http(&self, url: &Url) -> Result<bytes::Bytes, FetchError> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }
        Ok(response.bytes().await?)
    }

    async fn fetch_s3(&self, s3: &S3Client, url: &Url) -> Result<bytes::Bytes, FetchError> {
        let bucket = url
            .host_str()
            .ok_or_else(|| FetchError::UnsupportedUrl(url.to_string()))?;
        let key = url.path().trim_start_matches('/');
        if key.is_empty() {
            return Err(FetchError::UnsupportedUrl(url.to_string()));
        }

        let object = s3
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| FetchError::S3(format!("get_object {bucket}/{key}: {e}")))?;

        let data = object
            .body
            .collect()
            .await
            .map_err(|e| FetchError::S3(format!("reading {bucket}/{key}: {e}")))?;
        Ok(data.into_bytes())
    }
}

#[async_trait]
impl ResumeFetcher for BlobFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResume, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::UnsupportedUrl(url.to_string()))?;
        let file_name = file_name_from_url(&parsed);

        let bytes = match (parsed.scheme(), &self.s3) {
            ("http" | "https", _) => self.fetch_http(&parsed).await?,
            ("s3", Some(s3)) => self.fetch_s3(s3, &parsed).await?,
            _ => return Err(FetchError::UnsupportedUrl(url.to_string())),
        };

        info!("Fetched stored resume '{}' ({} bytes)", file_name, bytes.len());
        Ok(FetchedResume { bytes, file_name })
    }
}

/// Last non-empty path segment of the URL; query and fragment are ignored.
pub fn file_name_from_url(url: &Url) -> String {
    let name = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or_default()
        .to_string();
    debug!("Resolved file name '{name}' from {url}");
    name
}
