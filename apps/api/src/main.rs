mod config;
mod errors;
mod jobs;
mod matching;
mod models;
mod routes;
mod state;
mod storage;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ExtractorBackend, S3Settings};
use crate::jobs::PgJobDirectory;
use crate::matching::extractor::{LocalPdfExtractor, RemotePdfExtractor, TextExtractor};
use crate::matching::pipeline::ResumeMatcher;
use crate::matching::similarity::JaccardScorer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::BlobFetcher;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first: a missing extractor credential stops startup here.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobboard API v{}", env!("CARGO_PKG_VERSION"));

    let outbound_timeout = Duration::from_secs(config.outbound_timeout_secs);

    // Job postings (PostgreSQL)
    let jobs =
        PgJobDirectory::connect(&config.database_url, config.database_max_connections).await?;

    // Stored résumés: plain URLs always, s3:// when credentials are present
    let mut fetcher = BlobFetcher::new(outbound_timeout)?;
    match &config.s3 {
        Some(s3) => {
            fetcher = fetcher.with_s3(build_s3_client(s3).await);
            info!("S3 client initialized ({})", s3.endpoint);
        }
        None => warn!("S3 not configured; s3:// resume URLs will be rejected"),
    }

    // PDF text extraction
    let (extractor, extractor_name): (Arc<dyn TextExtractor>, &'static str) =
        match config.extractor_backend {
            ExtractorBackend::Remote => {
                let endpoint = config
                    .extractor_url
                    .clone()
                    .context("PDF_EXTRACTOR_URL is required for the remote extractor")?;
                let extractor = RemotePdfExtractor::new(
                    endpoint,
                    config.extractor_api_key.clone(),
                    outbound_timeout,
                )?;
                (Arc::new(extractor) as Arc<dyn TextExtractor>, "remote")
            }
            ExtractorBackend::Local => {
                (Arc::new(LocalPdfExtractor) as Arc<dyn TextExtractor>, "local")
            }
        };
    info!("PDF extractor: {extractor_name}");

    let matcher = ResumeMatcher::new(
        Arc::new(jobs),
        Arc::new(fetcher),
        extractor,
        Arc::new(JaccardScorer),
    );

    let state = AppState {
        matcher: Arc::new(matcher),
        max_upload_bytes: config.max_upload_bytes,
        extractor_backend: extractor_name,
    };

    // A dropped request future cancels its in-flight fetch or extraction call.
    let app = build_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(settings: &S3Settings) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &settings.access_key_id,
        &settings.secret_access_key,
        None,
        None,
        "jobboard-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(&settings.endpoint)
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&s3_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
