//! Optional entity-recognition capability.
//!
//! The pipeline only sees the narrow `EntityRecognizer` trait. `NoopRecognizer` is
//! installed when no recognizer is available; the pipeline then relies on the
//! regex heuristics alone. `AppState` carries the recognizer as
//! `Arc<dyn EntityRecognizer>`, loaded once and read concurrently.

use serde::Serialize;

const MAX_ORGANIZATIONS: usize = 5;
/// Shorter texts are never worth sending to a recognizer.
pub const MIN_RECOGNIZABLE_LEN: usize = 10;

/// Structured hints produced by a recognizer. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityHints {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub organizations: Vec<String>,
}

impl EntityHints {
    /// Keeps the first five distinct organizations in the order they were seen.
    pub fn with_organizations<I, S>(mut self, organizations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for org in organizations {
            let org = org.into();
            if org.trim().is_empty() || unique.contains(&org) {
                continue;
            }
            unique.push(org);
            if unique.len() == MAX_ORGANIZATIONS {
                break;
            }
        }
        self.organizations = unique;
        self
    }
}

pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> EntityHints;

    /// Label for logs.
    fn backend(&self) -> &'static str;
}

/// Used when no recognizer is available. Always returns empty hints.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecognizer;

impl EntityRecognizer for NoopRecognizer {
    fn recognize(&self, _text: &str) -> EntityHints {
        EntityHints::default()
    }

    fn backend(&self) -> &'static str {
        "none"
    }
}

/// Runs the recognizer unless the text is too short to be meaningful. The
/// length is counted in characters, whitespace included.
pub fn recognize_hints(recognizer: &dyn EntityRecognizer, text: &str) -> EntityHints {
    if text.chars().count() < MIN_RECOGNIZABLE_LEN {
        return EntityHints::default();
    }
    recognizer.recognize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRecognizer;

    impl EntityRecognizer for FixedRecognizer {
        fn recognize(&self, _text: &str) -> EntityHints {
            EntityHints {
                name: "Ada Lovelace".to_string(),
                ..Default::default()
            }
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_organizations_deduplicated_in_order_and_capped() {
        let hints = EntityHints::default().with_organizations([
            "Acme", "Globex", "Acme", "Initech", "", "Umbrella", "Hooli", "Stark",
        ]);
        assert_eq!(
            hints.organizations,
            vec!["Acme", "Globex", "Initech", "Umbrella", "Hooli"]
        );
    }

    #[test]
    fn test_noop_returns_empty_hints() {
        let hints = recognize_hints(&NoopRecognizer, "Jane Doe, Software Engineer at Acme");
        assert_eq!(hints, EntityHints::default());
    }

    #[test]
    fn test_short_text_skips_recognizer() {
        assert_eq!(recognize_hints(&FixedRecognizer, "  tiny  "), EntityHints::default());
        assert_eq!(
            recognize_hints(&FixedRecognizer, "long enough text").name,
            "Ada Lovelace"
        );
    }

    #[test]
    fn test_length_gate_counts_surrounding_whitespace() {
        assert_eq!(
            recognize_hints(&FixedRecognizer, "    tiny    ").name,
            "Ada Lovelace"
        );
        assert_eq!(recognize_hints(&FixedRecognizer, "ééééééééé"), EntityHints::default());
    }
}
