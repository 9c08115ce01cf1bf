//! Text Extractor — turns raw document bytes into plain text.
//!
//! Never fails: decode errors and decoder panics are carried forward as text
//! ("Error parsing PDF: …"), and unsupported formats become a placeholder line.
//! Downstream heuristics then find nothing and confidence drops to the low tier.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::extraction::font_scan::scan_font_spans;
use crate::models::document::{DocumentKind, ExtractedText, RawDocument};

pub fn extract_text(doc: &RawDocument) -> ExtractedText {
    let extracted = match doc.kind() {
        DocumentKind::Pdf => ExtractedText {
            plain_text: extract_pdf_text(&doc.bytes),
            font_spans: scan_font_spans(&doc.bytes),
        },
        DocumentKind::Docx => ExtractedText {
            plain_text: extract_docx_text(&doc.bytes),
            font_spans: None,
        },
        DocumentKind::Unsupported => {
            warn!("Unsupported file type: {}", doc.filename);
            ExtractedText {
                plain_text: format!("Unsupported file type: {}", doc.filename),
                font_spans: None,
            }
        }
    };

    debug!(
        "Extracted {} chars from {} ({} font spans)",
        extracted.plain_text.len(),
        doc.filename,
        extracted.font_spans.as_ref().map_or(0, Vec::len)
    );
    extracted
}

pub fn extract_pdf_text(bytes: &[u8]) -> String {
    // pdf_extract can panic on malformed PDFs
    let result = catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF extraction failed: {e}");
            format!("Error parsing PDF: {e}")
        }
        Err(_) => {
            warn!("PDF extraction panicked (malformed PDF)");
            "Error parsing PDF: malformed document".to_string()
        }
    }
}

/// One line per top-level body paragraph.
pub fn extract_docx_text(bytes: &[u8]) -> String {
    let result = catch_unwind(AssertUnwindSafe(|| docx_rs::read_docx(bytes)));

    let docx = match result {
        Ok(Ok(docx)) => docx,
        Ok(Err(e)) => {
            warn!("DOCX extraction failed: {e}");
            return format!("Error parsing DOCX: {e}");
        }
        Err(_) => {
            warn!("DOCX extraction panicked (malformed DOCX)");
            return "Error parsing DOCX: malformed document".to_string();
        }
    };

    let mut text = String::new();
    for child in &docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(para) = child {
            push_paragraph_children(&para.children, &mut text);
            text.push('\n');
        }
    }
    text
}

fn push_paragraph_children(children: &[docx_rs::ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run(run, out),
            docx_rs::ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            _ => {}
        }
    }
}

fn push_run(run: &docx_rs::Run, out: &mut String) {
    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text_elem) => out.push_str(&text_elem.text),
            docx_rs::RunChild::Tab(_) => out.push('\t'),
            docx_rs::RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}
