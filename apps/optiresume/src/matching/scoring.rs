//! Match Scoring — pluggable, trait-based scorer that measures a parsed résumé
//! against the skills a job description requires.
//!
//! Default: `KeywordMatchScorer` (pure-Rust, deterministic, fully testable).
//! `AppState` holds an `Arc<dyn MatchScorer>`.

use serde::{Deserialize, Serialize};

use crate::models::resume::ParseResult;

const STRONG_THRESHOLD: f32 = 0.8;
const PARTIAL_THRESHOLD: f32 = 0.4;
const TAG_MATCH_STRENGTH: f32 = 1.0;
const TEXT_MATCH_STRENGTH: f32 = 0.6;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// One required skill and how well the résumé covers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    /// Where the evidence came from: "skill tag" or "résumé text".
    pub evidence: String,
    pub strength: f32, // 0.0 – 1.0
}

/// A required skill the résumé does not cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub skill: String,
    /// A résumé skill that overlaps the missing one, if any.
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub overall_score: u32,               // 0 – 100
    pub strong_matches: Vec<SkillMatch>,  // strength ≥ 0.8
    pub partial_matches: Vec<SkillMatch>, // 0.4 – 0.79
    pub gaps: Vec<Gap>,                   // strength < 0.4
    pub recommendation: String,
    pub scorer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching callers.
pub trait MatchScorer: Send + Sync {
    fn score(&self, resume: &ParseResult, required: &[String]) -> MatchReport;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer
// ────────────────────────────────────────────────────────────────────────────

/// Keyword scorer:
/// 1. For each required skill:
///    - skill tag exact match (case-insensitive) → strength 1.0
///    - raw text substring match → strength 0.6
///    - no match → strength 0.0
/// 2. overall_score = Σ strength / n × 100, rounded
/// 3. Classify: strong (≥0.8), partial (0.4–0.79), gap (<0.4)
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordMatchScorer;

impl MatchScorer for KeywordMatchScorer {
    fn score(&self, resume: &ParseResult, required: &[String]) -> MatchReport {
        compute_keyword_match(resume, required)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

fn compute_keyword_match(resume: &ParseResult, required: &[String]) -> MatchReport {
    if required.is_empty() {
        return MatchReport {
            overall_score: 0,
            strong_matches: vec![],
            partial_matches: vec![],
            gaps: vec![],
            recommendation: "No known skills found in the job description — cannot score match."
                .to_string(),
            scorer_backend: "keyword".to_string(),
        };
    }

    let tags: Vec<String> = resume
        .parsed
        .skills
        .iter()
        .map(|s| s.name.to_lowercase())
        .collect();
    let text_lower = resume.raw_text.to_lowercase();

    let mut strong_matches = Vec::new();
    let mut partial_matches = Vec::new();
    let mut gaps = Vec::new();
    let mut total_strength = 0.0_f32;

    for skill in required {
        let skill_lower = skill.to_lowercase();

        let (strength, evidence) = if tags.iter().any(|t| *t == skill_lower) {
            (TAG_MATCH_STRENGTH, "skill tag")
        } else if text_lower.contains(&skill_lower) {
            (TEXT_MATCH_STRENGTH, "résumé text")
        } else {
            (0.0, "")
        };
        total_strength += strength;

        if strength >= STRONG_THRESHOLD {
            strong_matches.push(SkillMatch {
                skill: skill.clone(),
                evidence: evidence.to_string(),
                strength,
            });
        } else if strength >= PARTIAL_THRESHOLD {
            partial_matches.push(SkillMatch {
                skill: skill.clone(),
                evidence: evidence.to_string(),
                strength,
            });
        } else {
            gaps.push(Gap {
                skill: skill.clone(),
                suggestion: find_related_skill(resume, &skill_lower),
            });
        }
    }

    let overall_score = ((total_strength / required.len() as f32) * 100.0).round() as u32;
    let recommendation = build_recommendation(overall_score, &gaps);

    MatchReport {
        overall_score,
        strong_matches,
        partial_matches,
        gaps,
        recommendation,
        scorer_backend: "keyword".to_string(),
    }
}

/// First résumé skill whose name overlaps the missing skill, e.g. "Java" for
/// "JavaScript".
fn find_related_skill(resume: &ParseResult, skill_lower: &str) -> Option<String> {
    resume
        .parsed
        .skills
        .iter()
        .find(|tag| {
            let tag_lower = tag.name.to_lowercase();
            !tag_lower.is_empty()
                && (tag_lower.contains(skill_lower) || skill_lower.contains(&tag_lower))
        })
        .map(|tag| tag.name.clone())
}

fn build_recommendation(score: u32, gaps: &[Gap]) -> String {
    let top_gaps: Vec<&str> = gaps.iter().take(3).map(|g| g.skill.as_str()).collect();

    if score >= 80 {
        "Strong match. The résumé directly covers the key required skills.".to_string()
    } else if score >= 60 {
        format!(
            "Moderate match ({score}/100). Consider highlighting: {}.",
            top_gaps.join(", ")
        )
    } else {
        format!(
            "Low match ({score}/100). Significant gaps: {}. Consider tailoring the résumé before applying.",
            top_gaps.join(", ")
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
