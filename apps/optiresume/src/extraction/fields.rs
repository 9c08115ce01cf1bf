//! Single-purpose field detectors. Each returns the first match, or an empty string.

use once_cell::sync::Lazy;
use regex::{Match, Regex};

use crate::extraction::vocabulary::SKILL_VOCABULARY;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

// Checked in order; the first family with any match wins even if a later family
// would match earlier in the text.
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // International / grouped, e.g. +91 98908 12345
        r"\+?\d{1,3}[ \t-]?\(?\d{2,5}\)?[ \t-]?\d{3,5}[ \t-]?\d{3,5}",
        // US, e.g. (555) 123-4567
        r"\(?\d{3}\)?[-. \t]?\d{3}[-. \t]?\d{4}",
        // Plain dashed, e.g. 555.123.4567
        r"\d{3}[-. \t]?\d{3}[-. \t]?\d{4}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid phone regex"))
    .collect()
});

static LINKEDIN_PATTERNS: Lazy<Vec<(Regex, bool)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"https?://(?:www\.)?linkedin\.com/in/[A-Za-z0-9\-_/]+")
                .expect("valid linkedin regex"),
            false,
        ),
        (
            Regex::new(r"(?:www\.)?linkedin\.com/in/[A-Za-z0-9\-_/]+")
                .expect("valid linkedin regex"),
            true,
        ),
        (
            Regex::new(r"linkedin\.com/in/[A-Za-z0-9\-_/]+").expect("valid linkedin regex"),
            true,
        ),
    ]
});

static GITHUB_PATTERNS: Lazy<Vec<(Regex, bool)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"https?://(?:www\.)?github\.com/[A-Za-z0-9\-_/]+")
                .expect("valid github regex"),
            false,
        ),
        (
            Regex::new(r"(?:www\.)?github\.com/[A-Za-z0-9\-_/]+").expect("valid github regex"),
            true,
        ),
    ]
});

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-zA-Z]+,[ \t]*[A-Z][a-zA-Z]+\b").expect("valid location regex")
});

pub fn extract_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn extract_phone(text: &str) -> String {
    PHONE_PATTERNS
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn extract_linkedin(text: &str) -> String {
    first_profile_url(text, &LINKEDIN_PATTERNS)
}

pub fn extract_github(text: &str) -> String {
    first_profile_url(text, &GITHUB_PATTERNS)
}

/// Vocabulary terms present anywhere in the text, in vocabulary order.
///
/// Plain substring matching: short terms such as "AI" also hit words like
/// "maintained". Callers accept that imprecision.
pub fn extract_skills(text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| text_lower.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

/// First `City, Region` pair in the text.
pub fn extract_location(text: &str) -> String {
    LOCATION_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn first_profile_url(text: &str, patterns: &[(Regex, bool)]) -> String {
    for (re, needs_boundary) in patterns {
        let found = if *needs_boundary {
            find_not_after_word(re, text)
        } else {
            re.find(text)
        };
        if let Some(m) = found {
            let url = m.as_str().trim_start();
            if url.starts_with("http") {
                return url.to_string();
            }
            return format!("https://{url}");
        }
    }
    String::new()
}

/// Leftmost match that does not start directly after a word character.
fn find_not_after_word<'t>(re: &Regex, text: &'t str) -> Option<Match<'t>> {
    let mut start = 0;
    while let Some(m) = re.find_at(text, start) {
        let preceded_by_word = text[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        if !preceded_by_word {
            return Some(m);
        }
        // Retry one character further so a shorter suffix match can still win.
        start = m.start()
            + text[m.start()..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_first_match_wins() {
        let text = "Contact: jane.doe@example.com or backup@mail.org";
        assert_eq!(extract_email(text), "jane.doe@example.com");
    }

    #[test]
    fn test_email_absent_is_empty() {
        assert_eq!(extract_email("no address here @ all"), "");
    }

    #[test]
    fn test_phone_international_family_wins() {
        let text = "Mobile: +91 98908 12345\nOffice: 555-123-4567";
        assert_eq!(extract_phone(text), "+91 98908 12345");
    }

    #[test]
    fn test_phone_us_dashed() {
        assert_eq!(extract_phone("Call 555-123-4567 today"), "555-123-4567");
    }

    #[test]
    fn test_phone_does_not_span_lines() {
        let text = "ID 12345\n6789";
        assert_eq!(extract_phone(text), "");
    }

    #[test]
    fn test_phone_absent_is_empty() {
        assert_eq!(extract_phone("no digits"), "");
    }

    #[test]
    fn test_linkedin_with_protocol_kept() {
        let text = "Profile https://www.linkedin.com/in/jane-doe-42";
        assert_eq!(
            extract_linkedin(text),
            "https://www.linkedin.com/in/jane-doe-42"
        );
    }

    #[test]
    fn test_linkedin_bare_gets_protocol() {
        assert_eq!(
            extract_linkedin("linkedin.com/in/janedoe | github"),
            "https://linkedin.com/in/janedoe"
        );
        assert_eq!(
            extract_linkedin("see www.linkedin.com/in/janedoe"),
            "https://www.linkedin.com/in/janedoe"
        );
    }

    #[test]
    fn test_linkedin_glued_prefix_falls_back_to_suffix() {
        // "xwww." is glued to a word; the bare domain after the dot still counts.
        assert_eq!(
            extract_linkedin("xwww.linkedin.com/in/abc"),
            "https://linkedin.com/in/abc"
        );
    }

    #[test]
    fn test_github_bare_gets_protocol() {
        assert_eq!(
            extract_github("code: github.com/janedoe/tools"),
            "https://github.com/janedoe/tools"
        );
        assert_eq!(extract_github("mygithub.com/x"), "");
    }

    #[test]
    fn test_skills_follow_vocabulary_order() {
        let text = "Built services in Docker and python; led agile ceremonies.";
        assert_eq!(extract_skills(text), vec!["Python", "Docker", "Agile"]);
    }

    #[test]
    fn test_skills_substring_collision_is_kept() {
        // "maintained" contains "ai".
        assert_eq!(extract_skills("maintained the wiki"), vec!["AI"]);
    }

    #[test]
    fn test_location_city_region() {
        assert_eq!(
            extract_location("Jane Doe\nPune, India | +91 98908 12345"),
            "Pune, India"
        );
        assert_eq!(extract_location("lowercase, words"), "");
    }
}
