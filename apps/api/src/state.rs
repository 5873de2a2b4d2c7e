use std::sync::Arc;

use crate::matching::pipeline::ResumeMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Scoring pipeline, wired at startup with its extractor, storage and job directory.
    pub matcher: Arc<ResumeMatcher>,
    /// Upper bound on a multipart request body, résumé included.
    pub max_upload_bytes: usize,
    /// Name of the PDF extraction backend, reported by /health.
    pub extractor_backend: &'static str,
}
