//! Lexical similarity — token-set Jaccard overlap between a job description and résumé text.
//!
//! Tokens are lower-cased, whitespace-delimited substrings. No stemming, no stop words,
//! no n-grams: the metric stays auditable and a score can be recomputed by hand.

use std::collections::HashSet;

/// Pluggable similarity backend. Carried by the matcher as `Arc<dyn SimilarityScorer>`.
pub trait SimilarityScorer: Send + Sync {
    /// Returns a match percentage in `0..=100`.
    fn score(&self, job_description: &str, resume_text: &str) -> u32;
}

/// Default scorer: rounded Jaccard index of the two token sets.
pub struct JaccardScorer;

impl SimilarityScorer for JaccardScorer {
    fn score(&self, job_description: &str, resume_text: &str) -> u32 {
        similarity_score(job_description, resume_text)
    }
}

/// Lower-cases `text` and splits it on runs of whitespace. Duplicates collapse.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// |A ∩ B| / |A ∪ B|. Two empty sets have zero similarity.
pub fn jaccard_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Jaccard similarity as an integer percentage. Ties round half away from zero,
/// which for non-negative values is round-half-up.
pub fn similarity_score(job_description: &str, resume_text: &str) -> u32 {
    let similarity = jaccard_similarity(&tokenize(job_description), &tokenize(resume_text));
    ((similarity * 100.0).round() as u32).min(100)
}
