//! Axum route handlers for résumé matching.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::matching::extractor::DocumentInput;
use crate::matching::pipeline::ResumeSource;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    #[serde(rename = "similarityScore")]
    pub similarity_score: u32,
}

/// Fields collected from the multipart form.
#[derive(Debug, Default)]
struct MatchForm {
    job_id: Option<String>,
    upload: Option<DocumentInput>,
    resume_url: Option<String>,
}

impl MatchForm {
    /// An uploaded file wins over a stored URL.
    fn resume_source(self) -> (Option<String>, Option<ResumeSource>) {
        let source = self
            .upload
            .map(ResumeSource::Upload)
            .or(self.resume_url.map(ResumeSource::StoredUrl));
        (self.job_id, source)
    }
}

async fn read_form(mut multipart: Multipart) -> Result<MatchForm, AppError> {
    let mut form = MatchForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_id" | "jobId" => {
                form.job_id = non_blank(read_text(field).await?);
            }
            "resume_url" | "resumeUrl" => {
                form.resume_url = non_blank(read_text(field).await?);
            }
            "resume" | "resumeFile" => {
                // Browsers send an empty part with no filename when no file was picked.
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read resume: {e}")))?;
                if !file_name.is_empty() {
                    form.upload = Some(DocumentInput::new(bytes, file_name));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read form field: {e}")))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// POST /api/v1/resume-match
///
/// Multipart form: `job_id`, plus either a `resume` file or a `resume_url`.
/// The camelCase names `jobId`, `resumeFile` and `resumeUrl` are accepted too.
/// Returns `{"similarityScore": n}` with `n` in 0..=100.
pub async fn handle_resume_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let (job_id, resume) = read_form(multipart).await?.resume_source();

    let similarity_score = state.matcher.score(job_id.as_deref(), resume).await?;

    Ok(Json(MatchResponse { similarity_score }))
}
