//! Section Segmenter — splits résumé text into experience and education blocks.
//!
//! A header line opens a new block and flushes the previous one; every other line
//! is appended to the open block. Text before the first header is dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::extraction::vocabulary::{DEGREE_KEYWORDS, EDUCATION_HEADERS, EXPERIENCE_HEADERS};

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)((Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec)[a-z]*\s+\d{4}|\d{4})")
        .expect("valid date regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Experience,
    Education,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub kind: SectionKind,
    pub header_title: String,
    pub body_text: String,
}

/// Experience keywords are checked first, so a line mentioning both is an
/// experience header.
pub fn classify_header(line: &str) -> Option<SectionKind> {
    let lower = line.trim().to_lowercase();
    if EXPERIENCE_HEADERS.iter().any(|kw| lower.contains(kw)) {
        Some(SectionKind::Experience)
    } else if EDUCATION_HEADERS.iter().any(|kw| lower.contains(kw)) {
        Some(SectionKind::Education)
    } else {
        None
    }
}

pub fn segment_sections(text: &str) -> Vec<SectionBlock> {
    let mut sections = Vec::new();
    let mut current: Option<SectionBlock> = None;

    for line in text.split('\n') {
        if let Some(kind) = classify_header(line) {
            if let Some(done) = current.take() {
                sections.push(done);
            }
            current = Some(SectionBlock {
                kind,
                header_title: line.trim().to_string(),
                body_text: String::new(),
            });
        } else if let Some(open) = current.as_mut() {
            open.body_text.push_str(line);
            open.body_text.push('\n');
        }
    }

    if let Some(done) = current {
        sections.push(done);
    }
    sections
}

/// First degree keyword contained in the body, in keyword-list order.
pub fn detect_degree(body: &str) -> String {
    let lower = body.to_lowercase();
    DEGREE_KEYWORDS
        .iter()
        .find(|kw| lower.contains(*kw))
        .map(|kw| kw.to_string())
        .unwrap_or_default()
}

/// First `Month YYYY` or bare four-digit year in the body.
pub fn detect_year(body: &str) -> String {
    DATE_RE
        .find(body)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
