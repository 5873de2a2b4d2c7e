//! Fakes and spies for the matcher's collaborators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::jobs::JobDirectory;
use crate::matching::extractor::{ExtractionError, TextExtractor};
use crate::matching::pipeline::ResumeMatcher;
use crate::matching::similarity::{JaccardScorer, SimilarityScorer};
use crate::models::job::JobPosting;
use crate::storage::{FetchError, FetchedResume, ResumeFetcher};

pub const JOB_ID: &str = "6f1c2a9e-0d3b-4c8e-9a51-3b7d2e4f8a10";

pub fn go_job() -> JobPosting {
    JobPosting {
        id: Uuid::parse_str(JOB_ID).unwrap(),
        title: "Platform Engineer".to_string(),
        about: "Build scalable APIs".to_string(),
        responsibilities: vec!["using Go".to_string()],
        nice_to_haves: vec!["and Kubernetes".to_string()],
        created_at: Utc::now(),
    }
}

#[derive(Default)]
pub struct FakeJobs {
    jobs: HashMap<String, JobPosting>,
    broken: bool,
    calls: AtomicUsize,
}

impl FakeJobs {
    pub fn with_job(mut self, id: &str, job: JobPosting) -> Self {
        self.jobs.insert(id.to_string(), job);
        self
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobDirectory for FakeJobs {
    async fn find(&self, job_id: &str) -> anyhow::Result<Option<JobPosting>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            anyhow::bail!("connection pool timed out");
        }
        Ok(self.jobs.get(job_id).cloned())
    }
}

enum Stored {
    Found(FetchedResume),
    Status(u16),
}

#[derive(Default)]
pub struct FakeFetcher {
    objects: HashMap<String, Stored>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn with_object(mut self, url: &str, file_name: &str, bytes: &'static [u8]) -> Self {
        self.objects.insert(
            url.to_string(),
            Stored::Found(FetchedResume {
                bytes: Bytes::from_static(bytes),
                file_name: file_name.to_string(),
            }),
        );
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.objects.insert(url.to_string(), Stored::Status(status));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResumeFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResume, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.objects.get(url) {
            Some(Stored::Found(resume)) => Ok(resume.clone()),
            Some(Stored::Status(status)) => Err(FetchError::Status {
                status: *status,
                message: "Forbidden".to_string(),
            }),
            None => Err(FetchError::Status {
                status: 404,
                message: "Not Found".to_string(),
            }),
        }
    }
}

enum Outcome {
    Text(String),
    Fail { status: u16, message: String },
    Stall(Duration),
}

pub struct SpyExtractor {
    outcome: Outcome,
    calls: AtomicUsize,
}

impl SpyExtractor {
    pub fn returning(text: &str) -> Self {
        Self {
            outcome: Outcome::Text(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            outcome: Outcome::Fail {
                status,
                message: message.to_string(),
            },
            calls: AtomicUsize::new(0),
        }
    }

    /// Sleeps for `delay` before answering, like a hung extraction service.
    pub fn stalling(delay: Duration) -> Self {
        Self {
            outcome: Outcome::Stall(delay),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for SpyExtractor {
    async fn extract_pdf(&self, _pdf: Bytes) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Text(text) => Ok(text.clone()),
            Outcome::Fail { status, message } => Err(ExtractionError::Api {
                status: *status,
                message: message.clone(),
            }),
            Outcome::Stall(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(String::new())
            }
        }
    }
}

/// Real Jaccard scoring, plus a call counter.
#[derive(Default)]
pub struct SpyScorer {
    calls: AtomicUsize,
}

impl SpyScorer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SimilarityScorer for SpyScorer {
    fn score(&self, job_description: &str, resume_text: &str) -> u32 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        JaccardScorer.score(job_description, resume_text)
    }
}

/// A matcher wired to the given fakes, with handles kept for assertions.
pub struct Harness {
    pub jobs: Arc<FakeJobs>,
    pub fetcher: Arc<FakeFetcher>,
    pub extractor: Arc<SpyExtractor>,
    pub scorer: Arc<SpyScorer>,
}

impl Harness {
    pub fn new(jobs: FakeJobs, fetcher: FakeFetcher, extractor: SpyExtractor) -> Self {
        Self {
            jobs: Arc::new(jobs),
            fetcher: Arc::new(fetcher),
            extractor: Arc::new(extractor),
            scorer: Arc::new(SpyScorer::default()),
        }
    }

    /// Go/Kubernetes job, empty storage, extractor returning `text`.
    pub fn with_text(text: &str) -> Self {
        Self::new(
            FakeJobs::default().with_job(JOB_ID, go_job()),
            FakeFetcher::default(),
            SpyExtractor::returning(text),
        )
    }

    pub fn matcher(&self) -> ResumeMatcher {
        ResumeMatcher::new(
            self.jobs.clone(),
            self.fetcher.clone(),
            self.extractor.clone(),
            self.scorer.clone(),
        )
    }
}
