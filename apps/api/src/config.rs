use anyhow::{bail, Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Which PDF text extraction backend scores résumés.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorBackend {
    /// External extraction service, called over HTTP with an API key.
    Remote,
    /// In-process extraction via `pdf-extract`.
    Local,
}

/// Credentials for fetching stored résumés from S3 / MinIO.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub s3: Option<S3Settings>,
    pub extractor_backend: ExtractorBackend,
    pub extractor_url: Option<String>,
    pub extractor_api_key: Option<String>,
    pub outbound_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Parses configuration from an arbitrary key lookup.
    /// Blank values are treated as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let extractor_backend = match get("PDF_EXTRACTOR").as_deref() {
            None | Some("remote") => ExtractorBackend::Remote,
            Some("local") => ExtractorBackend::Local,
            Some(other) => bail!("PDF_EXTRACTOR must be 'remote' or 'local', got '{other}'"),
        };

        let extractor_url = get("PDF_EXTRACTOR_URL");
        let extractor_api_key = get("PDF_EXTRACTOR_API_KEY");
        if extractor_backend == ExtractorBackend::Remote {
            require("PDF_EXTRACTOR_URL")?;
            require("PDF_EXTRACTOR_API_KEY")?;
        }

        let s3 = match (
            get("S3_ENDPOINT"),
            get("AWS_ACCESS_KEY_ID"),
            get("AWS_SECRET_ACCESS_KEY"),
        ) {
            (Some(endpoint), Some(access_key_id), Some(secret_access_key)) => Some(S3Settings {
                endpoint,
                region: get("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                access_key_id,
                secret_access_key,
            }),
            _ => None,
        };

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 10)?,
            s3,
            extractor_backend,
            extractor_url,
            extractor_api_key,
            outbound_timeout_secs: parse_or(&get, "OUTBOUND_TIMEOUT_SECS", 30)?,
            request_timeout_secs: parse_or(&get, "REQUEST_TIMEOUT_SECS", 60)?,
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            port: parse_or(&get, "PORT", 8080)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
