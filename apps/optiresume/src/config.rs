use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every key has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    /// Searched in order for `.tex` templates.
    pub templates_dirs: Vec<PathBuf>,
    pub latex_engine: String,
    pub latex_fallback_engine: String,
    pub latex_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rust_log: "info".to_string(),
            templates_dirs: vec![PathBuf::from("templates")],
            latex_engine: "pdflatex".to_string(),
            latex_fallback_engine: "xelatex".to_string(),
            latex_timeout_secs: 120,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            rust_log: env_or("RUST_LOG", &defaults.rust_log),
            templates_dirs: match std::env::var_os("TEMPLATES_DIR") {
                Some(raw) => std::env::split_paths(&raw).collect(),
                None => defaults.templates_dirs,
            },
            latex_engine: env_or("LATEX_ENGINE", &defaults.latex_engine),
            latex_fallback_engine: env_or("LATEX_FALLBACK_ENGINE", &defaults.latex_fallback_engine),
            latex_timeout_secs: std::env::var("LATEX_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.latex_timeout_secs.to_string())
                .parse::<u64>()
                .context("LATEX_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
