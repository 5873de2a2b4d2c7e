use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The parts of a job posting that feed résumé matching.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub about: String,
    pub responsibilities: Vec<String>,
    pub nice_to_haves: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl JobPosting {
    /// Narrative, responsibilities and nice-to-haves joined by spaces, then trimmed.
    pub fn description_text(&self) -> String {
        format!(
            "{} {} {}",
            self.about,
            self.responsibilities.join(" "),
            self.nice_to_haves.join(" ")
        )
        .trim()
        .to_string()
    }
}
