use std::io::Cursor;
use std::sync::Arc;

use docx_rs::{Docx, Paragraph, Run};

use optiresume::extraction::NoopRecognizer;
use optiresume::matching::{extract_job_skills, KeywordMatchScorer, MatchScorer};
use optiresume::models::resume::{CONFIDENCE_HIGH, CONFIDENCE_LOW};
use optiresume::render::render_html;
use optiresume::{parse_resume, parse_resume_from_path, RawDocument};

fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }
    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();
    buf.into_inner()
}

const RESUME: &[&str] = &[
    "Priya Raman",
    "priya.raman@example.com | +91 98908 12345",
    "linkedin.com/in/priya-raman | github.com/priyar",
    "Pune, Maharashtra",
    "Platform engineer focused on developer tooling and fast feedback loops.",
    "Professional Experience",
    "Staff Engineer, Initech (Jan 2020 - present)",
    "Moved CI to Kubernetes and Docker; cut build times in half with Python tooling.",
    "Education",
    "B.Tech in Computer Engineering, 2014",
];

#[test]
fn test_docx_resume_end_to_end() {
    let doc = RawDocument::new(build_docx(RESUME), "priya_resume.docx");
    let result = parse_resume(&doc, &NoopRecognizer);
    let info = &result.parsed.personal_info;

    assert_eq!(info.name, "Priya Raman");
    assert_eq!(info.email, "priya.raman@example.com");
    assert_eq!(info.phone, "+91 98908 12345");
    assert_eq!(info.linkedin, "https://linkedin.com/in/priya-raman");
    assert_eq!(info.github, "https://github.com/priyar");
    assert_eq!(info.location, "Pune, Maharashtra");
    assert_eq!(
        result.parsed.summary,
        "Platform engineer focused on developer tooling and fast feedback loops."
    );
    assert_eq!(result.confidence, CONFIDENCE_HIGH);

    assert_eq!(result.parsed.work_experience.len(), 1);
    assert_eq!(
        result.parsed.work_experience[0].title,
        "Professional Experience"
    );
    assert!(result.parsed.work_experience[0]
        .description
        .starts_with("Staff Engineer, Initech"));

    assert_eq!(result.parsed.education.len(), 1);
    assert_eq!(result.parsed.education[0].title, "B.Tech");
    assert_eq!(result.parsed.education[0].year, "2014");

    let skills: Vec<&str> = result.parsed.skills.iter().map(|s| s.name.as_str()).collect();
    for expected in ["Python", "Docker", "Kubernetes"] {
        assert!(skills.contains(&expected), "missing skill {expected}");
    }
    assert!(result.parsed.projects.is_empty());
    assert!(result.parsed.certifications.is_empty());
    assert!(result.raw_text.contains("Priya Raman"));
}

#[test]
fn test_garbage_pdf_degrades_without_error() {
    let doc = RawDocument::new(b"%PDF-1.4 truncated".to_vec(), "jane_doe.pdf");
    let result = parse_resume(&doc, &NoopRecognizer);

    assert!(result.raw_text.starts_with("Error parsing PDF:"));
    assert_eq!(result.parsed.personal_info.email, "");
    assert_eq!(result.confidence, CONFIDENCE_LOW);
    assert!(result.parsed.work_experience.is_empty());
}

#[test]
fn test_match_and_render_from_parsed_resume() {
    let doc = RawDocument::new(build_docx(RESUME), "resume.docx");
    let result = parse_resume(&doc, &NoopRecognizer);

    let required = extract_job_skills("We need Python, Kubernetes and Azure experience.");
    assert_eq!(required, vec!["Python", "Azure", "Kubernetes"]);

    let report = KeywordMatchScorer.score(&result, &required);
    assert_eq!(report.strong_matches.len(), 2);
    assert_eq!(report.gaps.len(), 1);
    assert_eq!(report.gaps[0].skill, "Azure");
    assert_eq!(report.overall_score, 67);

    let html = render_html(&result.parsed, Some("billryan_modern"));
    assert!(html.contains("<h1>Priya Raman</h1>"));
    assert!(html.contains("<h2>Work Experience</h2>"));
}

#[tokio::test]
async fn test_parse_from_path_uses_base_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("priya_resume.docx");
    std::fs::write(&path, build_docx(RESUME)).unwrap();

    let result = parse_resume_from_path(&path, Arc::new(NoopRecognizer))
        .await
        .unwrap();
    assert_eq!(result.parsed.personal_info.name, "Priya Raman");
}
