//! Font-size scan over the first pages of a PDF.
//!
//! Runs independently of plain-text extraction through a `pdf_extract::OutputDev`
//! that groups characters into spans of one baseline and one effective size.
//! Any failure yields `None`; the caller treats that as "no font candidate".

use std::panic::{catch_unwind, AssertUnwindSafe};

use pdf_extract::{output_doc, Document, MediaBox, OutputDev, OutputError, Transform};
use tracing::debug;

use crate::models::document::FontSpan;

/// Pages scanned for spans, counted from the first.
const SCANNED_PAGES: u32 = 2;
const MIN_CANDIDATE_CHARS: usize = 2;
const MAX_CANDIDATE_CHARS: usize = 60;
const SIZE_EPSILON: f64 = 0.01;

#[derive(Debug, Default)]
struct SpanCollector {
    spans: Vec<FontSpan>,
    page: u32,
    buf: String,
    buf_size: f64,
    last_y: f64,
    last_end: f64,
    first_char: bool,
}

impl SpanCollector {
    fn scanning(&self) -> bool {
        self.page < SCANNED_PAGES
    }

    fn flush(&mut self) {
        if self.buf.trim().is_empty() {
            self.buf.clear();
            return;
        }
        self.spans.push(FontSpan {
            text: std::mem::take(&mut self.buf),
            size: self.buf_size,
            page: self.page,
        });
    }
}

impl OutputDev for SpanCollector {
    fn begin_page(
        &mut self,
        page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.flush();
        self.page = page_num.saturating_sub(1);
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        if !self.scanning() {
            return Ok(());
        }

        // Effective size: the font size scaled by the text rendering matrix.
        let sx = font_size * trm.m11 + font_size * trm.m21;
        let sy = font_size * trm.m12 + font_size * trm.m22;
        let size = (sx * sy).abs().sqrt();
        let (x, y) = (trm.m31, trm.m32);

        let new_line = (y - self.last_y).abs() > size * 0.5;
        let new_size = (size - self.buf_size).abs() > SIZE_EPSILON;
        if !self.buf.is_empty() && (new_line || new_size) {
            self.flush();
        }

        if self.buf.is_empty() {
            self.buf_size = size;
        } else if self.first_char && x > self.last_end + size * 0.1 {
            self.buf.push(' ');
        }

        self.buf.push_str(char);
        self.first_char = false;
        self.last_y = y;
        self.last_end = x + width * size;
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        self.first_char = true;
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Collects font spans from the first two pages, or `None` if the PDF cannot be
/// walked.
pub fn scan_font_spans(bytes: &[u8]) -> Option<Vec<FontSpan>> {
    let outcome = catch_unwind(AssertUnwindSafe(|| -> Option<Vec<FontSpan>> {
        let doc = Document::load_mem(bytes).ok()?;
        if doc.is_encrypted() {
            return None;
        }
        let mut collector = SpanCollector::default();
        output_doc(&doc, &mut collector).ok()?;
        collector.flush();
        Some(collector.spans)
    }));

    match outcome {
        Ok(spans) => spans,
        Err(_) => {
            debug!("Font scan panicked; continuing without font candidate");
            None
        }
    }
}

/// Text of the strictly-largest span of 2–60 characters. Earlier spans win ties.
pub fn largest_font_span(spans: &[FontSpan]) -> String {
    let mut best: Option<&FontSpan> = None;
    for span in spans.iter().filter(|s| s.page < SCANNED_PAGES) {
        let len = span.text.trim().chars().count();
        if !(MIN_CANDIDATE_CHARS..=MAX_CANDIDATE_CHARS).contains(&len) {
            continue;
        }
        if best.map_or(true, |b| span.size > b.size) {
            best = Some(span);
        }
    }
    best.map(|s| s.text.trim().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, size: f64, page: u32) -> FontSpan {
        FontSpan {
            text: text.to_string(),
            size,
            page,
        }
    }

    #[test]
    fn test_largest_span_wins() {
        let spans = vec![
            span("Software Engineer", 12.0, 0),
            span("Jane Doe", 24.0, 0),
            span("Experience", 14.0, 0),
        ];
        assert_eq!(largest_font_span(&spans), "Jane Doe");
    }

    #[test]
    fn test_length_bounds_and_ties() {
        let long = "x".repeat(61);
        let spans = vec![
            span("J", 40.0, 0),
            span(&long, 30.0, 0),
            span("First Big", 20.0, 0),
            span("Second Big", 20.0, 0),
        ];
        assert_eq!(largest_font_span(&spans), "First Big");
    }

    #[test]
    fn test_pages_beyond_second_ignored() {
        let spans = vec![span("Jane Doe", 18.0, 1), span("Appendix Title", 30.0, 2)];
        assert_eq!(largest_font_span(&spans), "Jane Doe");
    }

    #[test]
    fn test_scans_spans_from_generated_pdf() {
        let spans = scan_font_spans(&crate::render::placeholder_pdf()).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text.trim(), "Resume PDF - LaTeX not available");
        assert!((spans[0].size - 24.0).abs() < 0.01);
        assert_eq!(spans[0].page, 0);
    }

    #[test]
    fn test_largest_span_of_real_pdf_is_heading() {
        let pdf = crate::render::single_page_pdf(
            "BT /F1 10 Tf 72 740 Td (Acme Corporation) Tj ET\n\
             BT /F1 28 Tf 72 700 Td (Jane Doe) Tj ET\n\
             BT /F1 11 Tf 72 670 Td (Backend engineer) Tj ET",
        );
        let spans = scan_font_spans(&pdf).unwrap();
        assert_eq!(spans.len(), 3);
        assert!(spans[0].size < spans[1].size);
        assert_eq!(largest_font_span(&spans), "Jane Doe");
    }

    #[test]
    fn test_garbage_bytes_yield_no_spans() {
        assert!(scan_font_spans(b"definitely not a pdf").is_none());
        assert_eq!(largest_font_span(&[]), "");
    }
}
