//! OptiResume: résumé information extraction, skill matching, and rendering.

pub mod commands;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod matching;
pub mod models;
pub mod render;
pub mod state;

pub use errors::AppError;
pub use extraction::{parse_resume, parse_resume_from_path};
pub use models::document::RawDocument;
pub use models::resume::{ParseResult, ParsedResume};
