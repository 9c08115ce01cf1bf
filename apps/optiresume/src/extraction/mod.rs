// Résumé information-extraction pipeline.
// Text extraction → field heuristics + section segmentation → name resolution → assembly.
// Nothing here returns an error: bad input degrades to empty fields and low confidence.

pub mod assembler;
pub mod fields;
pub mod font_scan;
pub mod name;
pub mod recognizer;
pub mod sections;
pub mod text;
pub mod vocabulary;

pub use assembler::{parse_resume, parse_resume_from_path};
pub use recognizer::{EntityHints, EntityRecognizer, NoopRecognizer};
