use std::sync::Arc;

use crate::config::Config;
use crate::extraction::recognizer::{EntityRecognizer, NoopRecognizer};
use crate::matching::scoring::{KeywordMatchScorer, MatchScorer};

/// Shared application state handed to every command.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Optional entity recognizer. Default: NoopRecognizer (regex heuristics only).
    pub recognizer: Arc<dyn EntityRecognizer>,
    /// Pluggable match scorer. Default: KeywordMatchScorer.
    pub scorer: Arc<dyn MatchScorer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            recognizer: Arc::new(NoopRecognizer),
            scorer: Arc::new(KeywordMatchScorer),
        }
    }
}
