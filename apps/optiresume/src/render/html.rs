//! HTML preview rendering with a small set of themes that approximate the LaTeX
//! templates. Every piece of résumé text is escaped; empty sections are omitted.

use crate::models::resume::ParsedResume;
use crate::render::latex::{
    DEFAULT_EMAIL, DEFAULT_LOCATION, DEFAULT_NAME, DEFAULT_PHONE, DEFAULT_SUMMARY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Modern,
    Classic,
    Minimal,
    Basic,
    /// Two columns: dark contact/skills sidebar beside the main content.
    ModernExecutive,
    /// Two columns under a dark header band with maroon accents.
    Template1,
}

impl Theme {
    /// Picks a theme from a template name, e.g. `billryan_modern.tex`.
    pub fn from_template(template: Option<&str>) -> Self {
        let name = template.unwrap_or("billryan_basic").to_lowercase();
        if name.contains("modern_executive") {
            Theme::ModernExecutive
        } else if name.contains("billryan_modern") {
            Theme::Modern
        } else if name.contains("classic_professional") {
            Theme::Classic
        } else if name.contains("minimal_clean") {
            Theme::Minimal
        } else if name.contains("template1") {
            Theme::Template1
        } else {
            Theme::Basic
        }
    }

    fn stylesheet(self) -> &'static str {
        match self {
            Theme::Modern => MODERN_CSS,
            Theme::Classic => CLASSIC_CSS,
            Theme::Minimal => MINIMAL_CSS,
            Theme::Basic => BASIC_CSS,
            Theme::ModernExecutive => MODERN_EXECUTIVE_CSS,
            Theme::Template1 => TEMPLATE1_CSS,
        }
    }

    fn contact_class(self) -> &'static str {
        match self {
            Theme::Modern => "contact",
            _ => "muted",
        }
    }

    fn header_rule(self) -> &'static str {
        match self {
            Theme::Classic => "\n      <hr />",
            Theme::Basic => "\n      <div class='rule'></div>",
            _ => "",
        }
    }
}

const MODERN_CSS: &str = "
      body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 40px auto; max-width: 820px; color:#333; line-height:1.6; }
      .head { text-align:center; margin-bottom:24px; padding-bottom:16px; border-bottom:2px solid #2c3e50; }
      .head h1 { margin:0; font-size:40px; font-weight:700; color:#2c3e50; }
      .contact { color:#555; margin-top:6px; }
      h2 { color:#2c3e50; margin:28px 0 10px; padding-bottom:6px; border-bottom:1px solid #d0d7de; font-size:16px; letter-spacing:.06em; text-transform:uppercase; }
      .summary { background:#f5f7fb; border:1px solid #e1e6f0; padding:14px 16px; border-radius:10px; }
      .skills { display:flex; flex-wrap:wrap; gap:8px; }
      .skill { background:#ecf0f1; padding:4px 10px; border-radius:14px; font-size:12px; }
      .item { margin:10px 0; }
      .ititle { margin-bottom:4px; }
";

const CLASSIC_CSS: &str = "
      body { font-family: Georgia, 'Times New Roman', serif; margin: 36px auto; max-width: 820px; color:#222; line-height:1.7; }
      .head { text-align:center; margin-bottom:18px; }
      .head h1 { margin:0 0 4px; font-size:38px; font-weight:700; color:#0f172a; }
      .muted { color:#444; }
      hr { border:0; height:1px; background:#cbd5e1; margin:16px 0 10px; }
      h2 { margin:16px 0 8px; font-size:16px; letter-spacing:.04em; text-transform:uppercase; color:#0f172a; }
      .item { margin:8px 0; }
";

const MINIMAL_CSS: &str = "
      body { font-family: 'Inter', 'Segoe UI', Tahoma, sans-serif; margin: 48px auto; max-width: 820px; color:#1f2937; line-height:1.8; }
      .head h1 { margin:0 0 6px; font-size:34px; font-weight:700; }
      .muted { color:#6b7280; }
      section { margin:22px 0; }
      section h2 { margin:0 0 8px; font-size:15px; letter-spacing:.08em; text-transform:uppercase; color:#111827; }
      .item { margin:6px 0; }
      .skills .skill { display:inline-block; margin:2px 6px 2px 0; padding:2px 8px; border:1px solid #e5e7eb; border-radius:12px; font-size:12px; }
";

const BASIC_CSS: &str = "
      body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 40px auto; max-width: 820px; color:#333; line-height:1.6; }
      .head { text-align:center; }
      .head h1 { margin:0 0 6px; font-size:36px; font-weight:600; color:#223; }
      .muted { color:#666; }
      .rule { border-top:2px solid #2c3e50; margin:22px 0; }
      h2 { margin:18px 0 10px; font-size:16px; letter-spacing:.06em; text-transform:uppercase; color:#2c3e50; }
      .skills { display:flex; flex-wrap:wrap; gap:8px; }
      .skill { background:#eef2f7; padding:4px 10px; border-radius:14px; font-size:12px; }
      .item { margin:10px 0; }
      .ititle { margin-bottom:4px; }
";

const MODERN_EXECUTIVE_CSS: &str = "
      * { box-sizing: border-box; }
      body { margin: 0; font-family: 'Inter','Segoe UI',Tahoma,sans-serif; color: #111827; }
      .container { display: grid; grid-template-columns: 280px 1fr; min-height: 100vh; }
      .sidebar { background: #111827; color: #e5e7eb; padding: 28px 24px; }
      .avatar { width: 88px; height: 88px; border-radius: 50%; background: linear-gradient(135deg, #4f46e5, #9333ea); margin-bottom: 16px; }
      .name { color:#fff; font-weight: 800; font-size: 22px; line-height: 1.2; }
      .side-block { margin-top: 22px; }
      .sb-title { font-size: 12px; letter-spacing: .12em; text-transform: uppercase; color:#9ca3af; margin-bottom: 8px; }
      .contact { padding: 0; margin: 0; }
      .contact li { list-style: none; margin: 6px 0; font-size: 13px; color:#e5e7eb; word-break: break-all; }
      .contact a { color:#c7d2fe; }
      .skill { display:inline-block; margin: 4px 6px 0 0; padding: 4px 10px; border-radius: 999px; font-size: 12px; background: #1f2937; border: 1px solid #374151; color:#e5e7eb; }
      .content { padding: 36px 40px; }
      .hdr { border-bottom: 4px solid #4f46e5; padding-bottom: 8px; margin-bottom: 16px; }
      .hdr h1 { margin:0; font-size: 34px; font-weight: 900; color: #1f2937; }
      .hdr .meta { color:#4b5563; margin-top: 6px; }
      h2 { margin: 20px 0 8px; font-size: 14px; letter-spacing:.14em; text-transform: uppercase; color: #1f2937; }
      .item { margin:10px 0; }
      .summary { background: #f8fafc; border:1px solid #e5e7eb; padding:14px 16px; border-radius: 8px; }
      .section-divider { height: 1px; background: #e5e7eb; margin: 8px 0 4px; }
      @media print {
        .container { grid-template-columns: 240px 1fr; }
        .content { padding: 24px 28px; }
      }
";

const TEMPLATE1_CSS: &str = "
      * { box-sizing: border-box; }
      body { margin:0; font-family: Georgia, 'Times New Roman', serif; color:#1f2937; background:#f8f5f2; }
      .header { background:#111111; color:#fff; padding:16px 28px; border-bottom:6px solid #7a1d12; }
      .name { font-weight:900; font-size:36px; letter-spacing:.02em; }
      .contacts { margin-top:8px; font-size:12px; opacity:.95; display:flex; flex-wrap:wrap; gap:10px; align-items:center; }
      .contacts a { color:#fff; }
      .dot::before { content:''; display:inline-block; width:6px; height:6px; background:#7a1d12; border-radius:50%; margin:0 8px; vertical-align:middle; }
      .wrap { max-width:1000px; margin:0 auto; background:#fff; padding:18px 24px 28px; }
      .grid { display:grid; grid-template-columns: 1fr 0.9fr; gap:22px; }
      h2 { margin:16px 0 8px; font-size:16px; letter-spacing:.12em; text-transform:uppercase; color:#7a1d12; border-bottom:2px solid #7a1d12; padding-bottom:4px; }
      .section { margin-top:8px; }
      .item { padding:10px 0; border-bottom:1px dotted #cbd5e1; }
      .item:last-child { border-bottom:0; }
      .tags { display:flex; flex-wrap:wrap; gap:6px; margin-top:6px; }
      .skill { font-size:11px; border:1px solid #d1d5db; padding:2px 8px; border-radius:12px; background:#fafafa; }
      @media print { .wrap { padding:10px 16px 18px; } .grid { grid-template-columns: 1fr .9fr; gap:18px; } }
";

/// Escapes text for element content and quoted attribute values alike.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

/// Adds `https://` when missing. A value that does not mention `domain` is treated
/// as a bare handle and appended to `handle_prefix`.
fn normalize_profile_url(raw: &str, domain: &str, handle_prefix: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if !raw.contains(domain) {
        return format!("{handle_prefix}{raw}");
    }
    ensure_http(raw)
}

fn ensure_http(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn anchor(url: &str) -> String {
    let url = escape_html(url);
    format!("<a href=\"{url}\" target=\"_blank\" rel=\"noopener\">{url}</a>")
}

fn item(title: &str, body: &str) -> String {
    format!(
        "<div class=\"item\"><div class=\"ititle\"><strong>{}</strong></div><div class=\"ibody\">{}</div></div>",
        escape_html(title),
        escape_html(body)
    )
}

struct Sections {
    work: String,
    education: String,
    skills: String,
    projects: String,
    certs: String,
}

fn build_sections(resume: &ParsedResume) -> Sections {
    let work: Vec<String> = resume
        .work_experience
        .iter()
        .map(|e| item(or_default(&e.title, "Experience"), &e.description))
        .collect();
    let education: Vec<String> = resume
        .education
        .iter()
        .map(|e| item(or_default(&e.title, "Education"), &e.description))
        .collect();
    let skills: Vec<String> = resume
        .skills
        .iter()
        .filter(|s| !s.name.trim().is_empty())
        .map(|s| format!("<span class=\"skill\">{}</span>", escape_html(&s.name)))
        .collect();
    let projects: Vec<String> = resume
        .projects
        .iter()
        .map(|p| item(or_default(&p.name, "Project"), &p.description))
        .collect();
    let certs: Vec<String> = resume
        .certifications
        .iter()
        .map(|c| item(or_default(&c.name, "Certification"), &c.issuer))
        .collect();

    Sections {
        work: work.join("\n"),
        education: education.join("\n"),
        skills: skills.join("\n"),
        projects: projects.join("\n"),
        certs: certs.join("\n"),
    }
}

fn push_section(out: &mut String, theme: Theme, heading: &str, body: &str, body_class: &str) {
    if body.is_empty() {
        return;
    }
    let class_attr = if body_class.is_empty() {
        String::new()
    } else {
        format!(" class='{body_class}'")
    };
    match theme {
        Theme::Minimal => out.push_str(&format!(
            "\n    <section{class_attr}><h2>{heading}</h2><div>{body}</div></section>"
        )),
        _ => out.push_str(&format!("\n    <h2>{heading}</h2><div{class_attr}>{body}</div>")),
    }
}

/// Escaped header fields shared by every layout.
struct Header {
    name: String,
    email: String,
    phone: String,
    location: String,
    summary: String,
    /// Profile and website anchors, already escaped.
    links: Vec<String>,
}

impl Header {
    fn from_resume(resume: &ParsedResume) -> Self {
        let info = &resume.personal_info;
        let links = [
            normalize_profile_url(&info.linkedin, "linkedin.com", "https://linkedin.com/in/"),
            normalize_profile_url(&info.github, "github.com", "https://github.com/"),
            ensure_http(&info.website),
        ]
        .iter()
        .filter(|url| !url.is_empty())
        .map(|url| anchor(url))
        .collect();

        Self {
            name: escape_html(or_default(&info.name, DEFAULT_NAME)),
            email: escape_html(or_default(&info.email, DEFAULT_EMAIL)),
            phone: escape_html(or_default(&info.phone, DEFAULT_PHONE)),
            location: escape_html(or_default(&info.location, DEFAULT_LOCATION)),
            summary: escape_html(or_default(&resume.summary, DEFAULT_SUMMARY)),
            links,
        }
    }

    /// `email · phone · location` followed by any links.
    fn contact_line(&self) -> String {
        let mut line = format!("{} · {} · {}", self.email, self.phone, self.location);
        for link in &self.links {
            line.push_str(" · ");
            line.push_str(link);
        }
        line
    }
}

fn document_head(title: &str, theme: Theme) -> String {
    format!(
        "<!doctype html>
<html>
  <head>
    <meta charset='utf-8'/>
    <title>Resume - {title}</title>
    <style>{css}    </style>
  </head>
  <body>",
        css = theme.stylesheet(),
    )
}

pub fn render_html(resume: &ParsedResume, template: Option<&str>) -> String {
    let theme = Theme::from_template(template);
    let header = Header::from_resume(resume);
    let sections = build_sections(resume);

    let mut html = document_head(&header.name, theme);
    match theme {
        Theme::ModernExecutive => push_executive_layout(&mut html, &header, &sections),
        Theme::Template1 => push_template1_layout(&mut html, &header, &sections),
        _ => push_single_column(&mut html, theme, &header, &sections),
    }
    html.push_str("\n  </body>\n</html>\n");
    html
}

fn push_single_column(out: &mut String, theme: Theme, header: &Header, sections: &Sections) {
    out.push_str(&format!(
        "
    <div class='head'>
      <h1>{name}</h1>
      <div class='{contact_class}'>{contact}</div>{rule}
    </div>",
        name = header.name,
        contact = header.contact_line(),
        contact_class = theme.contact_class(),
        rule = theme.header_rule(),
    ));

    let summary_class = if theme == Theme::Modern { "summary" } else { "" };
    push_section(out, theme, "Professional Summary", &header.summary, summary_class);
    push_section(out, theme, "Work Experience", &sections.work, "");
    push_section(out, theme, "Education", &sections.education, "");
    let skills_class = if theme == Theme::Classic { "" } else { "skills" };
    push_section(out, theme, "Skills", &sections.skills, skills_class);
    push_section(out, theme, "Projects", &sections.projects, "");
    push_section(out, theme, "Certifications", &sections.certs, "");
}

fn push_executive_layout(out: &mut String, header: &Header, sections: &Sections) {
    let mut contact_items = vec![
        header.email.clone(),
        header.phone.clone(),
        header.location.clone(),
    ];
    contact_items.extend(header.links.iter().cloned());
    let contact_list: String = contact_items
        .iter()
        .map(|c| format!("\n            <li>{c}</li>"))
        .collect();

    out.push_str(&format!(
        "
    <div class='container'>
      <aside class='sidebar'>
        <div class='avatar'></div>
        <div class='name'>{name}</div>
        <div class='side-block'>
          <div class='sb-title'>Contact</div>
          <ul class='contact'>{contact_list}
          </ul>
        </div>",
        name = header.name,
    ));
    for (title, body) in [("Skills", &sections.skills), ("Certifications", &sections.certs)] {
        if !body.is_empty() {
            out.push_str(&format!(
                "\n        <div class='side-block'><div class='sb-title'>{title}</div><div>{body}</div></div>"
            ));
        }
    }

    out.push_str(&format!(
        "
      </aside>
      <main class='content'>
        <div class='hdr'>
          <h1>{name}</h1>
          <div class='meta'>{contact}</div>
        </div>
        <section>
          <h2>Professional Summary</h2>
          <div class='summary'>{summary}</div>
        </section>
        <div class='section-divider'></div>",
        name = header.name,
        contact = header.contact_line(),
        summary = header.summary,
    ));
    for (title, body) in [
        ("Work Experience", &sections.work),
        ("Projects", &sections.projects),
        ("Education", &sections.education),
    ] {
        if !body.is_empty() {
            out.push_str(&format!(
                "\n        <section><h2>{title}</h2><div>{body}</div></section>"
            ));
        }
    }
    out.push_str("\n      </main>\n    </div>");
}

fn push_template1_layout(out: &mut String, header: &Header, sections: &Sections) {
    let mut contacts = format!(
        "<span>{}</span><span class='dot'></span><span>{}</span><span class='dot'></span><span>{}</span>",
        header.email, header.phone, header.location
    );
    for link in &header.links {
        contacts.push_str(&format!("<span class='dot'></span><span>{link}</span>"));
    }

    out.push_str(&format!(
        "
    <div class='header'>
      <div class='name'>{name}</div>
      <div class='contacts'>{contacts}</div>
    </div>
    <div class='wrap'>
      <div class='grid'>
        <div>",
        name = header.name,
    ));
    push_column_section(out, "Experience", &sections.work, "section");
    push_column_section(out, "Projects", &sections.projects, "section");
    out.push_str("\n        </div>\n        <div>");
    push_column_section(out, "Strengths", &sections.skills, "section tags");
    push_column_section(out, "Education", &sections.education, "section");
    push_column_section(out, "Certifications", &sections.certs, "section");
    out.push_str("\n        </div>\n      </div>\n    </div>");
}

fn push_column_section(out: &mut String, heading: &str, body: &str, class: &str) {
    if body.is_empty() {
        return;
    }
    out.push_str(&format!(
        "\n          <h2>{heading}</h2>\n          <div class='{class}'>{body}</div>"
    ));
}
