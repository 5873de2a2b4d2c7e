//! Résumé match pipeline: job lookup → résumé resolution → extraction → scoring.
//!
//! Only two outcomes produce a score of 0 without an error: a non-PDF résumé and a PDF
//! whose extracted text is empty. Every collaborator failure propagates as an `AppError`.

use std::sync::Arc;

use tracing::info;

use crate::errors::AppError;
use crate::jobs::JobDirectory;
use crate::matching::extractor::{extract_text, DocumentInput, ExtractedText, TextExtractor};
use crate::matching::similarity::SimilarityScorer;
use crate::storage::ResumeFetcher;

/// Where the résumé comes from for a single scoring call.
#[derive(Debug, Clone)]
pub enum ResumeSource {
    Upload(DocumentInput),
    StoredUrl(String),
}

/// Runs one scoring request end to end. Holds no per-request state.
#[derive(Clone)]
pub struct ResumeMatcher {
    jobs: Arc<dyn JobDirectory>,
    resumes: Arc<dyn ResumeFetcher>,
    extractor: Arc<dyn TextExtractor>,
    scorer: Arc<dyn SimilarityScorer>,
}

impl ResumeMatcher {
    pub fn new(
        jobs: Arc<dyn JobDirectory>,
        resumes: Arc<dyn ResumeFetcher>,
        extractor: Arc<dyn TextExtractor>,
        scorer: Arc<dyn SimilarityScorer>,
    ) -> Self {
        Self {
            jobs,
            resumes,
            extractor,
            scorer,
        }
    }

    /// Scores a résumé against a job posting, returning a percentage in `0..=100`.
    pub async fn score(
        &self,
        job_id: Option<&str>,
        resume: Option<ResumeSource>,
    ) -> Result<u32, AppError> {
        let job_id = job_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::MissingInput("job_id is required".to_string()))?;
        let resume = resume.ok_or_else(|| {
            AppError::MissingInput("a resume file or resume_url is required".to_string())
        })?;

        let job = self
            .jobs
            .find(job_id)
            .await?
            .ok_or_else(|| AppError::JobNotFound(job_id.to_string()))?;
        let job_description = job.description_text();

        let document = match resume {
            ResumeSource::Upload(document) => document,
            ResumeSource::StoredUrl(url) => {
                let fetched = self.resumes.fetch(&url).await?;
                DocumentInput::new(fetched.bytes, fetched.file_name)
            }
        };

        let extracted = extract_text(self.extractor.as_ref(), &document).await?;
        let score = match &extracted {
            ExtractedText::Skipped(reason) => {
                info!("Not scoring resume for job {job_id}: {reason}");
                0
            }
            ExtractedText::Text(text) if text.is_empty() => {
                info!("Not scoring resume for job {job_id}: no text extracted");
                0
            }
            ExtractedText::Text(text) => self.scorer.score(&job_description, text),
        };

        info!("Resume match for job {job_id}: {score}");
        Ok(score)
    }
}
