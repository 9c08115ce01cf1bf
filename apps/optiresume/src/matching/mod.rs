// Skill matching: required skills pulled from a job description, scored against a
// parsed résumé by a pluggable `MatchScorer`.

pub mod job_skills;
pub mod scoring;

pub use job_skills::extract_job_skills;
pub use scoring::{KeywordMatchScorer, MatchReport, MatchScorer};
