use std::path::Path;

/// Decode path for an uploaded document, chosen from the filename extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Unsupported,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => DocumentKind::Pdf,
            Some("doc") | Some("docx") => DocumentKind::Docx,
            _ => DocumentKind::Unsupported,
        }
    }
}

/// An uploaded résumé as received at the boundary. Consumed once by the text extractor.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
    /// MIME type declared by the uploader, if any. Informational only.
    pub declared_type: Option<String>,
}

impl RawDocument {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        RawDocument {
            bytes,
            filename: filename.into(),
            declared_type: None,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_filename(&self.filename)
    }
}

/// A run of text rendered on one baseline at one effective font size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpan {
    pub text: String,
    pub size: f64,
    /// 0-based page index.
    pub page: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractedText {
    pub plain_text: String,
    /// Only populated for PDF input, and only when the font scan succeeded.
    pub font_spans: Option<Vec<FontSpan>>,
}
