//! Record Assembler — runs every extraction stage over one document and merges
//! the results into a `ParseResult`.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::fields::{
    extract_email, extract_github, extract_linkedin, extract_location, extract_phone,
    extract_skills,
};
use crate::extraction::font_scan::largest_font_span;
use crate::extraction::name::{resolve_name, NameInputs};
use crate::extraction::recognizer::{recognize_hints, EntityRecognizer};
use crate::extraction::sections::{detect_degree, detect_year, segment_sections, SectionKind};
use crate::extraction::text::extract_text;
use crate::models::document::{DocumentKind, RawDocument};
use crate::models::resume::{
    confidence_for, EducationEntry, ExperienceEntry, ParseResult, ParsedResume, PersonalInfo,
    SkillTag,
};

const MAX_DESCRIPTION_CHARS: usize = 200;
const MIN_SUMMARY_CHARS: usize = 20;

static CONTACT_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)@|linkedin|github|phone|\+\d|mailto|http").expect("valid contact line regex")
});

/// Parses one in-memory document. Never fails: unreadable input degrades to a
/// sparse record with low confidence.
pub fn parse_resume(doc: &RawDocument, recognizer: &dyn EntityRecognizer) -> ParseResult {
    let extracted = extract_text(doc);
    let text = extracted.plain_text.as_str();

    let hints = recognize_hints(recognizer, text);
    let font_candidate = extracted
        .font_spans
        .as_deref()
        .map(largest_font_span)
        .unwrap_or_default();

    let email = prefer_hint(&hints.email, || extract_email(text));
    let phone = prefer_hint(&hints.phone, || extract_phone(text));
    let location = prefer_hint(&hints.location, || extract_location(text));

    let resolution = resolve_name(&NameInputs {
        text,
        font_candidate: &font_candidate,
        recognizer_name: &hints.name,
        email: &email,
        filename: &doc.filename,
    });
    debug!(
        "Name resolved via {:?} after {} candidate(s)",
        resolution.accepted_source(),
        resolution.candidates.len()
    );
    let raw_name = resolution
        .candidates
        .iter()
        .find(|c| c.accepted)
        .map(|c| c.text.clone())
        .unwrap_or_default();
    let name = resolution.name;

    let mut education = Vec::new();
    let mut work_experience = Vec::new();
    for block in segment_sections(text) {
        let description = truncate_description(&block.body_text);
        match block.kind {
            SectionKind::Experience => work_experience.push(ExperienceEntry {
                title: block.header_title,
                description,
            }),
            SectionKind::Education => {
                let degree = detect_degree(&block.body_text);
                let title = if degree.is_empty() {
                    block.header_title
                } else {
                    title_case(&degree)
                };
                education.push(EducationEntry {
                    title,
                    description,
                    year: detect_year(&block.body_text),
                });
            }
        }
    }

    let confidence = confidence_for(&name, &email);
    let parsed = ParsedResume {
        personal_info: PersonalInfo {
            name: name.clone(),
            email,
            phone,
            location,
            linkedin: extract_linkedin(text),
            github: extract_github(text),
            website: String::new(),
        },
        summary: extract_summary(text, &[raw_name.as_str(), name.as_str()]),
        education,
        work_experience,
        projects: Vec::new(),
        skills: extract_skills(text)
            .into_iter()
            .map(SkillTag::technical)
            .collect(),
        certifications: Vec::new(),
    };

    info!(
        "Parsed {}: confidence {:.1}, {} experience / {} education block(s), {} skill(s)",
        doc.filename,
        confidence,
        parsed.work_experience.len(),
        parsed.education.len(),
        parsed.skills.len()
    );

    ParseResult {
        parsed,
        raw_text: extracted.plain_text,
        confidence,
        organizations: hints.organizations,
    }
}

/// Reads a résumé from disk and parses it on the blocking pool.
///
/// Unlike `parse_resume`, an unsupported extension is rejected up front.
pub async fn parse_resume_from_path(
    path: &Path,
    recognizer: Arc<dyn EntityRecognizer>,
) -> Result<ParseResult, AppError> {
    if !tokio::fs::try_exists(path).await? {
        return Err(AppError::NotFound(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    if DocumentKind::from_filename(&filename) == DocumentKind::Unsupported {
        return Err(AppError::UnsupportedFileType(filename));
    }

    let bytes = tokio::fs::read(path).await?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    let doc = RawDocument::new(bytes, filename);
    let result = tokio::task::spawn_blocking(move || parse_resume(&doc, recognizer.as_ref()))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("parse task failed: {e}")))?;
    Ok(result)
}

fn prefer_hint(hint: &str, fallback: impl FnOnce() -> String) -> String {
    let hint = hint.trim();
    if hint.is_empty() {
        fallback()
    } else {
        hint.to_string()
    }
}

/// First substantial line after the line carrying the name that is not contact
/// information. Anchors are tried in order (the name as written, then its
/// sanitized form); without a matching anchor the whole text is scanned.
pub fn extract_summary(text: &str, anchors: &[&str]) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = anchors
        .iter()
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty())
        .find_map(|needle| {
            lines
                .iter()
                .position(|l| l.to_lowercase().contains(&needle))
        })
        .map_or(0, |i| i + 1);

    lines[start..]
        .iter()
        .map(|l| l.trim())
        .find(|l| l.chars().count() > MIN_SUMMARY_CHARS && !CONTACT_LINE_RE.is_match(l))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Bodies are measured as segmented, trailing newline included.
pub fn truncate_description(body: &str) -> String {
    if body.chars().count() <= MAX_DESCRIPTION_CHARS {
        return body.to_string();
    }
    let mut cut: String = body.chars().take(MAX_DESCRIPTION_CHARS).collect();
    cut.push_str("...");
    cut
}

/// Upper-cases every letter that follows a non-letter: "b.sc" → "B.Sc".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}
