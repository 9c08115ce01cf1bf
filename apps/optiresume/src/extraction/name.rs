//! Name Resolver — ordered fallback chain that picks the most likely person name.
//!
//! Stages run lazily in priority order and the first accepted candidate wins:
//!
//! 1. `FontSize`        – largest-font span near the top of a PDF
//! 2. `EntityRecognizer`– name hint from the optional recognizer
//! 3. `HeaderScan`      – first name-like line among the first 15 non-blank lines
//! 4. `EmailLocalPart`  – `jane.doe123@…` → "Jane Doe"
//! 5. `CapitalizedPair` – first name-like token pair in the first 30 lines
//! 6. `Filename`        – `jane_doe_resume.pdf` → "Jane Doe"
//!
//! Stages 1–3 must pass `looks_like_name` as found; stages 4–6 are sanitized
//! first. Every accepted candidate must survive `sanitize_name`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::extraction::vocabulary::is_reserved_token;

const HEADER_SCAN_LINES: usize = 15;
const PAIR_SCAN_LINES: usize = 30;
const MAX_NAME_TOKENS: usize = 4;

static NAME_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\-.]+$").expect("valid name token regex"));
static CAPITALIZED_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z\-.]+$").expect("valid capitalized token regex"));
static SEPARATOR_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[._-]+").expect("valid separator regex"));
static EXTENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[A-Za-z0-9]+$").expect("valid extension regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    FontSize,
    EntityRecognizer,
    HeaderScan,
    EmailLocalPart,
    CapitalizedPair,
    Filename,
}

impl NameSource {
    /// Primary sources are trusted only when the raw text already looks like a name.
    fn is_primary(self) -> bool {
        matches!(
            self,
            NameSource::FontSize | NameSource::EntityRecognizer | NameSource::HeaderScan
        )
    }
}

/// A provisional name proposed by one stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateName {
    pub text: String,
    pub source: NameSource,
    pub accepted: bool,
}

/// Everything the resolver looks at for one document.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameInputs<'a> {
    pub text: &'a str,
    /// Largest-font span of a PDF, empty for other formats.
    pub font_candidate: &'a str,
    /// Name hint from the entity recognizer, empty when none is installed.
    pub recognizer_name: &'a str,
    pub email: &'a str,
    pub filename: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NameResolution {
    /// Sanitized name, or empty when every stage was rejected.
    pub name: String,
    /// Non-empty candidates in the order they were evaluated.
    pub candidates: Vec<CandidateName>,
}

impl NameResolution {
    pub fn accepted_source(&self) -> Option<NameSource> {
        self.candidates.iter().find(|c| c.accepted).map(|c| c.source)
    }
}

type Stage<'a> = (NameSource, Box<dyn Fn() -> String + 'a>);

/// Runs the fallback chain and returns the first accepted, sanitized name.
pub fn resolve_name(inputs: &NameInputs<'_>) -> NameResolution {
    let stages: Vec<Stage<'_>> = vec![
        (
            NameSource::FontSize,
            Box::new(move || inputs.font_candidate.trim().to_string()),
        ),
        (
            NameSource::EntityRecognizer,
            Box::new(move || inputs.recognizer_name.trim().to_string()),
        ),
        (NameSource::HeaderScan, Box::new(move || scan_header(inputs.text))),
        (
            NameSource::EmailLocalPart,
            Box::new(move || email_local_part(inputs.email)),
        ),
        (
            NameSource::CapitalizedPair,
            Box::new(move || find_capitalized_pair(inputs.text)),
        ),
        (
            NameSource::Filename,
            Box::new(move || filename_stem(inputs.filename)),
        ),
    ];

    let mut resolution = NameResolution::default();
    for (source, produce) in stages {
        let raw = produce();
        if raw.is_empty() {
            continue;
        }
        let accepted = accept_candidate(source, &raw);
        resolution.candidates.push(CandidateName {
            text: raw,
            source,
            accepted: accepted.is_some(),
        });
        if let Some(name) = accepted {
            resolution.name = name;
            break;
        }
    }
    resolution
}

fn accept_candidate(source: NameSource, raw: &str) -> Option<String> {
    if source.is_primary() && !looks_like_name(raw) {
        return None;
    }
    let sanitized = sanitize_name(raw);
    if sanitized.is_empty() || !looks_like_name(&sanitized) {
        return None;
    }
    Some(sanitized)
}

/// The acceptance predicate applied at every stage. Deliberately conservative:
/// an empty result is preferred over a wrong multi-token guess.
///
/// Accepts 2–5 tokens of letters, hyphens and periods, none of them reserved,
/// with at least one capitalized token.
pub fn looks_like_name(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if !(2..=5).contains(&tokens.len()) {
        return false;
    }
    if tokens
        .iter()
        .any(|t| is_reserved_token(&t.to_lowercase()))
    {
        return false;
    }
    let all_name_chars = tokens.iter().all(|t| NAME_TOKEN_RE.is_match(t));
    let any_capitalized = tokens.iter().any(|t| CAPITALIZED_TOKEN_RE.is_match(t));
    all_name_chars && any_capitalized
}

/// Strips every token to letters and hyphens, drops reserved words, title-cases,
/// and keeps at most four tokens. Fewer than two surviving tokens yields "".
pub fn sanitize_name(raw: &str) -> String {
    let clean: Vec<String> = raw
        .split_whitespace()
        .map(|t| {
            t.chars()
                .filter(|c| c.is_ascii_alphabetic() || *c == '-')
                .collect::<String>()
        })
        .filter(|t| !t.is_empty() && !is_reserved_token(&t.to_lowercase()))
        .map(|t| capitalize(&t))
        .collect();

    if clean.len() < 2 {
        return String::new();
    }
    clean
        .into_iter()
        .take(MAX_NAME_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(token: &str) -> String {
    let lower = token.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

fn scan_header(text: &str) -> String {
    non_blank_lines(text)
        .take(HEADER_SCAN_LINES)
        .find(|line| (2..=60).contains(&line.chars().count()) && looks_like_name(line))
        .map(str::to_string)
        .unwrap_or_default()
}

fn find_capitalized_pair(text: &str) -> String {
    for line in non_blank_lines(text).take(PAIR_SCAN_LINES) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        for pair in tokens.windows(2) {
            let candidate = format!("{} {}", pair[0], pair[1]);
            if looks_like_name(&candidate) {
                return candidate;
            }
        }
    }
    String::new()
}

fn email_local_part(email: &str) -> String {
    match email.split_once('@') {
        Some((local, _)) => SEPARATOR_RUN_RE.replace_all(local, " ").trim().to_string(),
        None => String::new(),
    }
}

fn filename_stem(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let stem = EXTENSION_RE.replace(base, "");
    SEPARATOR_RUN_RE.replace_all(&stem, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs<'a>(text: &'a str, email: &'a str, filename: &'a str) -> NameInputs<'a> {
        NameInputs {
            text,
            email,
            filename,
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_rejects_blacklisted_single_token() {
        assert!(!looks_like_name("Resume"));
    }

    #[test]
    fn test_filter_rejects_single_token() {
        assert!(!looks_like_name("John"));
    }

    #[test]
    fn test_filter_accepts_two_capitalized_tokens() {
        assert!(looks_like_name("John Smith"));
    }

    #[test]
    fn test_filter_rejects_technology_headline() {
        assert!(!looks_like_name("Python Developer"));
    }

    #[test]
    fn test_filter_rejects_digits_and_six_tokens() {
        assert!(!looks_like_name("John Smith 3rd"));
        assert!(!looks_like_name("A Bb Cc Dd Ee Ff"));
    }

    #[test]
    fn test_filter_requires_a_capitalized_token() {
        assert!(!looks_like_name("john smith"));
        assert!(looks_like_name("john Smith"));
    }

    #[test]
    fn test_sanitize_strips_digits_and_title_cases() {
        assert_eq!(sanitize_name("jane doe123"), "Jane Doe");
        assert_eq!(sanitize_name("MARY-ANN o'neil"), "Mary-ann Oneil");
    }

    #[test]
    fn test_sanitize_drops_reserved_and_truncates() {
        assert_eq!(sanitize_name("jane doe resume"), "Jane Doe");
        assert_eq!(sanitize_name("a b c d e f"), "A B C D");
        assert_eq!(sanitize_name("john cv"), "");
    }

    #[test]
    fn test_header_scan_takes_first_name_line() {
        let text = "\n  Curriculum Vitae \nJohn Smith\nSoftware Engineer\n";
        let res = resolve_name(&inputs(text, "", ""));
        assert_eq!(res.name, "John Smith");
        assert_eq!(res.accepted_source(), Some(NameSource::HeaderScan));
    }

    #[test]
    fn test_header_scan_limited_to_fifteen_lines() {
        let mut text = String::new();
        for i in 0..15 {
            text.push_str(&format!("line {i}\n"));
        }
        text.push_str("John Smith\n");
        assert_eq!(scan_header(&text), "");
    }

    #[test]
    fn test_font_candidate_has_priority() {
        let mut input = inputs("Jane Roe\n", "", "");
        input.font_candidate = "John Smith";
        let res = resolve_name(&input);
        assert_eq!(res.name, "John Smith");
        assert_eq!(res.accepted_source(), Some(NameSource::FontSize));
        assert_eq!(res.candidates.len(), 1);
    }

    #[test]
    fn test_rejected_font_candidate_falls_through() {
        let mut input = inputs("Jane Roe\n", "", "");
        input.font_candidate = "RESUME";
        let res = resolve_name(&input);
        assert_eq!(res.name, "Jane Roe");
        assert!(!res.candidates[0].accepted);
        assert_eq!(res.candidates[0].source, NameSource::FontSize);
    }

    #[test]
    fn test_recognizer_name_beats_header() {
        let mut input = inputs("Jane Roe\n", "", "");
        input.recognizer_name = "Ada Lovelace";
        let res = resolve_name(&input);
        assert_eq!(res.name, "Ada Lovelace");
        assert_eq!(res.accepted_source(), Some(NameSource::EntityRecognizer));
    }

    #[test]
    fn test_email_local_part_fallback() {
        let text = "PYTHON DEVELOPER\nBuilt things at scale for 5 years.";
        let res = resolve_name(&inputs(text, "jane.doe123@example.com", ""));
        assert_eq!(res.name, "Jane Doe");
        assert_eq!(res.accepted_source(), Some(NameSource::EmailLocalPart));
    }

    #[test]
    fn test_single_token_email_falls_to_capitalized_pair() {
        let text = "2019 - 2023\nMARIA GARCIA | payments";
        let res = resolve_name(&inputs(text, "jdoe@example.com", ""));
        assert_eq!(res.name, "Maria Garcia");
        assert_eq!(res.accepted_source(), Some(NameSource::CapitalizedPair));
    }

    #[test]
    fn test_filename_is_last_resort() {
        let res = resolve_name(&inputs("42\n", "", "uploads/jane_doe-resume.pdf"));
        assert_eq!(res.name, "Jane Doe");
        assert_eq!(res.accepted_source(), Some(NameSource::Filename));
    }

    #[test]
    fn test_nothing_found_is_empty() {
        let res = resolve_name(&inputs("2024\n", "", "cv.pdf"));
        assert_eq!(res.name, "");
        assert_eq!(res.accepted_source(), None);
    }

    #[test]
    fn test_filename_stem_strips_dirs_and_extension() {
        assert_eq!(filename_stem("C:\\docs\\john.smith.docx"), "john smith");
        assert_eq!(filename_stem("no_extension"), "no extension");
    }
}
