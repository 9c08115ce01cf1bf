//! Command handlers behind the `optiresume` binary. Each returns the bytes to
//! write out; `main` decides where they go.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::parse_resume_from_path;
use crate::matching::job_skills::extract_job_skills;
use crate::matching::scoring::MatchReport;
use crate::models::resume::{ParseResult, ParsedResume};
use crate::render::{find_template, list_templates, render_html, render_pdf, substitute_template_variables};
use crate::state::AppState;

pub const DEFAULT_TEMPLATE: &str = "modern.tex";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Html,
    Latex,
    Pdf,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub required_skills: Vec<String>,
    pub match_report: MatchReport,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// `optiresume parse <FILE>`: the full ParseResult as JSON.
pub async fn handle_parse(state: &AppState, path: &Path, compact: bool) -> Result<Vec<u8>, AppError> {
    let result = parse_resume_from_path(path, state.recognizer.clone()).await?;
    to_json_bytes(&result, compact)
}

/// `optiresume match <FILE>`: scores the résumé against a job description.
pub async fn handle_match(
    state: &AppState,
    path: &Path,
    job_description: &str,
) -> Result<Vec<u8>, AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job description cannot be empty".to_string(),
        ));
    }

    let result = parse_resume_from_path(path, state.recognizer.clone()).await?;
    let required_skills = extract_job_skills(job_description);
    let match_report = state.scorer.score(&result, &required_skills);
    info!(
        "Match score {} via {} scorer ({} required skill(s))",
        match_report.overall_score,
        state.scorer.backend(),
        required_skills.len()
    );

    to_json_bytes(
        &MatchResponse {
            required_skills,
            match_report,
        },
        false,
    )
}

/// `optiresume render <INPUT>`: HTML, filled-in LaTeX source, or compiled PDF.
pub async fn handle_render(
    state: &AppState,
    input: &Path,
    format: RenderFormat,
    template: Option<&str>,
) -> Result<Vec<u8>, AppError> {
    let resume = load_resume(state, input).await?;

    match format {
        RenderFormat::Html => Ok(render_html(&resume, template).into_bytes()),
        RenderFormat::Latex => {
            let name = template.unwrap_or(DEFAULT_TEMPLATE);
            let path = find_template(&state.config, name)
                .ok_or_else(|| AppError::NotFound(format!("Template not found: {name}")))?;
            let source = tokio::fs::read_to_string(&path).await.map_err(|e| {
                AppError::Render(format!("could not read template {}: {e}", path.display()))
            })?;
            Ok(substitute_template_variables(&source, &resume).into_bytes())
        }
        RenderFormat::Pdf => {
            let name = template.unwrap_or(DEFAULT_TEMPLATE);
            Ok(render_pdf(name, &resume, &state.config).await)
        }
    }
}

/// `optiresume templates`.
pub fn handle_templates(state: &AppState) -> Result<Vec<u8>, AppError> {
    let templates = list_templates(&state.config);
    to_json_bytes(&TemplatesResponse { templates }, false)
}

/// A résumé document is parsed; a `.json` file may hold either a ParseResult or
/// a bare (possibly hand-edited) ParsedResume.
pub async fn load_resume(state: &AppState, input: &Path) -> Result<ParsedResume, AppError> {
    let is_json = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if !is_json {
        return Ok(parse_resume_from_path(input, state.recognizer.clone())
            .await?
            .parsed);
    }

    if !tokio::fs::try_exists(input).await? {
        return Err(AppError::NotFound(format!(
            "File not found: {}",
            input.display()
        )));
    }
    let raw = tokio::fs::read_to_string(input).await?;
    match serde_json::from_str::<ParseResult>(&raw) {
        Ok(result) => Ok(result.parsed),
        Err(_) => Ok(serde_json::from_str::<ParsedResume>(&raw)?),
    }
}

fn to_json_bytes<T: Serialize>(value: &T, compact: bool) -> Result<Vec<u8>, AppError> {
    let mut bytes = if compact {
        serde_json::to_vec(value)?
    } else {
        serde_json::to_vec_pretty(value)?
    };
    bytes.push(b'\n');
    Ok(bytes)
}
