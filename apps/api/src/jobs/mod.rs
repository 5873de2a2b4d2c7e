use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::job::JobPosting;

/// Resolves job ids to postings. Carried as `Arc<dyn JobDirectory>`.
#[async_trait]
pub trait JobDirectory: Send + Sync {
    async fn find(&self, job_id: &str) -> Result<Option<JobPosting>>;
}

/// Job postings stored in PostgreSQL.
#[derive(Clone)]
pub struct PgJobDirectory {
    pool: PgPool,
}

impl PgJobDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and wraps it.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        info!("Connecting to PostgreSQL (max {max_connections} connections)...");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl JobDirectory for PgJobDirectory {
    async fn find(&self, job_id: &str) -> Result<Option<JobPosting>> {
        // Ids that are not UUIDs cannot exist in the table.
        let Ok(id) = Uuid::parse_str(job_id.trim()) else {
            return Ok(None);
        };

        let job = sqlx::query_as::<_, JobPosting>(
            r#"
            SELECT id, title, about, responsibilities, nice_to_haves, created_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }
}
