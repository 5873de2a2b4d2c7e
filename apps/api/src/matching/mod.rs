// Résumé matching: document extraction, lexical similarity, and the pipeline
// that ties them to job postings and stored résumés.

pub mod extractor;
pub mod handlers;
pub mod pipeline;
pub mod similarity;

#[cfg(test)]
pub mod testing;
