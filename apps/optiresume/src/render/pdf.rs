//! PDF rendering: template substitution followed by an external LaTeX compile.
//!
//! Each engine gets two passes, each bounded by the configured timeout. When no
//! engine produces a PDF the caller still gets a valid one-page placeholder.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::resume::ParsedResume;
use crate::render::latex::substitute_template_variables;
use crate::render::templates::find_template;

const JOB_NAME: &str = "resume";
const PLACEHOLDER_TEXT: &str = "Resume PDF - LaTeX not available";

/// Renders `template_name` for `resume`. Never fails; see `placeholder_pdf`.
pub async fn render_pdf(template_name: &str, resume: &ParsedResume, config: &Config) -> Vec<u8> {
    let Some(template_path) = find_template(config, template_name) else {
        warn!("Template {template_name} not found; returning placeholder PDF");
        return placeholder_pdf();
    };

    let template = match tokio::fs::read_to_string(&template_path).await {
        Ok(t) => t,
        Err(e) => {
            warn!("Could not read template {}: {e}", template_path.display());
            return placeholder_pdf();
        }
    };

    let source = substitute_template_variables(&template, resume);
    match compile_latex(&source, config).await {
        Some(pdf) => pdf,
        None => placeholder_pdf(),
    }
}

async fn compile_latex(source: &str, config: &Config) -> Option<Vec<u8>> {
    let work_dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(e) => {
            warn!("Could not create LaTeX work directory: {e}");
            return None;
        }
    };
    let tex_path = work_dir.path().join(format!("{JOB_NAME}.tex"));
    let pdf_path = work_dir.path().join(format!("{JOB_NAME}.pdf"));

    if let Err(e) = tokio::fs::write(&tex_path, source).await {
        warn!("Could not write LaTeX source: {e}");
        return None;
    }

    let timeout = Duration::from_secs(config.latex_timeout_secs);
    for engine in [&config.latex_engine, &config.latex_fallback_engine] {
        let mut any_success = false;
        for pass in 1..=2 {
            match run_engine(engine, work_dir.path(), &tex_path, timeout).await {
                Some(ok) => any_success |= ok,
                None => break,
            }
            debug!("{engine} pass {pass} finished");
        }

        if any_success && pdf_path.is_file() {
            match tokio::fs::read(&pdf_path).await {
                Ok(pdf) => {
                    info!("Compiled résumé PDF with {engine} ({} bytes)", pdf.len());
                    return Some(pdf);
                }
                Err(e) => warn!("Could not read compiled PDF: {e}"),
            }
        }
        warn!("LaTeX compilation with {engine} failed");
    }
    None
}

/// `Some(exit_success)` when the engine ran to completion, `None` when it could
/// not be started or timed out.
async fn run_engine(engine: &str, out_dir: &Path, tex_path: &Path, timeout: Duration) -> Option<bool> {
    let mut cmd = Command::new(engine);
    cmd.args(["-interaction=nonstopmode", "-halt-on-error", "-output-directory"])
        .arg(out_dir)
        .arg(tex_path)
        .current_dir(out_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => {
            if !output.status.success() {
                debug!(
                    "{engine} exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
            Some(output.status.success())
        }
        Ok(Err(e)) => {
            warn!("Could not run {engine}: {e}");
            None
        }
        Err(_) => {
            warn!("{engine} timed out after {}s", timeout.as_secs());
            None
        }
    }
}

/// Minimal single-page PDF with a one-line notice.
pub fn placeholder_pdf() -> Vec<u8> {
    single_page_pdf(&format!("BT /F1 24 Tf 72 720 Td ({PLACEHOLDER_TEXT}) Tj ET"))
}

/// A one-page Letter PDF drawing `stream` with Helvetica bound to `/F1`.
/// Cross-reference offsets are computed from the bytes actually written.
pub fn single_page_pdf(stream: &str) -> Vec<u8> {
    let objects = [
        "<</Type/Catalog/Pages 2 0 R>>".to_string(),
        "<</Type/Pages/Count 1/Kids[3 0 R]>>".to_string(),
        "<</Type/Page/Parent 2 0 R/MediaBox[0 0 612 792]/Contents 4 0 R/Resources<</Font<</F1 5 0 R>>>>>>"
            .to_string(),
        format!("<</Length {}>>stream\n{stream}\nendstream", stream.len()),
        "<</Type/Font/Subtype/Type1/BaseFont/Helvetica>>".to_string(),
    ];

    let mut buf: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(buf.len());
        buf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_pos = buf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    buf.extend_from_slice(xref.as_bytes());
    buf.extend_from_slice(
        format!(
            "trailer<</Size {}/Root 1 0 R>>\nstartxref\n{xref_pos}\n%%EOF",
            objects.len() + 1
        )
        .as_bytes(),
    );
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn test_placeholder_xref_offsets_point_at_objects() {
        let pdf = placeholder_pdf();
        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF"));

        let text = String::from_utf8(pdf.clone()).unwrap();
        let xref_start = find(&pdf, b"xref\n").unwrap();
        let startxref: usize = text
            .rsplit("startxref\n")
            .next()
            .and_then(|tail| tail.lines().next())
            .and_then(|n| n.parse().ok())
            .unwrap();
        assert_eq!(startxref, xref_start);

        let entries: Vec<&str> = text[xref_start..].lines().skip(3).take(5).collect();
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", i + 1);
            assert!(text[offset..].starts_with(&expected), "object {} misplaced", i + 1);
        }
    }

    #[test]
    fn test_placeholder_parses_as_pdf() {
        let doc = pdf_extract::Document::load_mem(&placeholder_pdf()).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_template_yields_placeholder() {
        let config = Config {
            templates_dirs: vec![std::path::PathBuf::from("/no/such/dir")],
            ..Config::default()
        };
        let pdf = render_pdf("modern.tex", &ParsedResume::default(), &config).await;
        assert_eq!(pdf, placeholder_pdf());
    }

    #[tokio::test]
    async fn test_missing_engines_yield_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t.tex"), "$name$").unwrap();
        let config = Config {
            templates_dirs: vec![dir.path().to_path_buf()],
            latex_engine: "optiresume-no-such-engine".to_string(),
            latex_fallback_engine: "optiresume-no-such-engine-either".to_string(),
            latex_timeout_secs: 5,
            ..Config::default()
        };
        let pdf = render_pdf("t.tex", &ParsedResume::default(), &config).await;
        assert_eq!(pdf, placeholder_pdf());
    }
}
