//! LaTeX template substitution.
//!
//! Templates carry `$placeholder$` markers. Substitution is a single left-to-right
//! pass: inserted values are never re-scanned, and markers with no known key are
//! left as written.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, ParsedResume, ProjectEntry, SkillTag,
};

pub const DEFAULT_NAME: &str = "Your Name";
pub const DEFAULT_EMAIL: &str = "your.email@example.com";
pub const DEFAULT_PHONE: &str = "(123) 456-7890";
pub const DEFAULT_LOCATION: &str = "City, State";
pub const DEFAULT_SUMMARY: &str = "Professional summary goes here.";

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([a-z_]+)\$").expect("valid placeholder regex"));

pub fn substitute_template_variables(template: &str, resume: &ParsedResume) -> String {
    let info = &resume.personal_info;

    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "name" => escape_latex(or_default(&info.name, DEFAULT_NAME)),
            "email" => escape_latex(or_default(&info.email, DEFAULT_EMAIL)),
            "phone" => escape_latex(or_default(&info.phone, DEFAULT_PHONE)),
            "location" => escape_latex(or_default(&info.location, DEFAULT_LOCATION)),
            "linkedin" => profile_link(&info.linkedin, "https://linkedin.com/in/", "LinkedIn"),
            "github" => profile_link(&info.github, "https://github.com/", "GitHub"),
            "website" => website_link(&info.website),
            "summary" => escape_latex(or_default(&resume.summary, DEFAULT_SUMMARY)),
            "work_experience" => format_work_experience(&resume.work_experience),
            "education" => format_education(&resume.education),
            "skills" => format_skills(&resume.skills),
            "projects" => format_projects(&resume.projects),
            "certifications" => format_certifications(&resume.certifications),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Escapes the characters LaTeX treats as markup.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

// `\href` takes the URL verbatim except for the two characters that would end
// or comment out the argument.
fn escape_url(url: &str) -> String {
    url.replace('%', r"\%").replace('#', r"\#")
}

fn profile_link(value: &str, handle_prefix: &str, label: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    let url = if value.starts_with("http") {
        value.to_string()
    } else {
        format!("{handle_prefix}{value}")
    };
    format!(r"\href{{{}}}{{{label}}}", escape_url(&url))
}

fn website_link(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    let url = if value.starts_with("http") {
        value.to_string()
    } else {
        format!("https://{value}")
    };
    format!(r"\href{{{}}}{{Website}}", escape_url(&url))
}

fn titled_block(out: &mut String, title: &str, body: &str) {
    out.push_str(&format!("\\textbf{{{}}}\\\\\n", escape_latex(title)));
    out.push_str(&escape_latex(body));
    out.push_str("\n\n");
}

pub fn format_work_experience(entries: &[ExperienceEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = String::from("\\section{Work Experience}\n");
    for entry in entries {
        titled_block(&mut out, or_default(&entry.title, "Position"), &entry.description);
    }
    out
}

pub fn format_education(entries: &[EducationEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = String::from("\\section{Education}\n");
    for entry in entries {
        titled_block(&mut out, or_default(&entry.title, "Degree"), &entry.description);
    }
    out
}

pub fn format_skills(skills: &[SkillTag]) -> String {
    let names: Vec<String> = skills
        .iter()
        .filter(|s| !s.name.trim().is_empty())
        .map(|s| escape_latex(&s.name))
        .collect();
    if names.is_empty() {
        return String::new();
    }
    format!("\\section{{Skills}}\n{}", names.join(", "))
}

pub fn format_projects(projects: &[ProjectEntry]) -> String {
    if projects.is_empty() {
        return String::new();
    }
    let mut out = String::from("\\section{Projects}\n");
    for project in projects {
        titled_block(&mut out, or_default(&project.name, "Project"), &project.description);
    }
    out
}

pub fn format_certifications(certifications: &[CertificationEntry]) -> String {
    if certifications.is_empty() {
        return String::new();
    }
    let mut out = String::from("\\section{Certifications}\n");
    for cert in certifications {
        out.push_str(&format!(
            "\\textbf{{{}}}",
            escape_latex(or_default(&cert.name, "Certification"))
        ));
        if !cert.issuer.is_empty() {
            out.push_str(&format!(" - {}", escape_latex(&cert.issuer)));
        }
        if !cert.date.is_empty() {
            out.push_str(&format!(" ({})", escape_latex(&cert.date)));
        }
        out.push_str("\\\\\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::PersonalInfo;

    fn sample() -> ParsedResume {
        ParsedResume {
            personal_info: PersonalInfo {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                linkedin: "janedoe".to_string(),
                github: "https://github.com/janedoe".to_string(),
                ..Default::default()
            },
            work_experience: vec![ExperienceEntry {
                title: "Experience".to_string(),
                description: "Cut costs by 40% at R&D".to_string(),
            }],
            skills: vec![SkillTag::technical("C#"), SkillTag::technical("Rust")],
            ..Default::default()
        }
    }

    #[test]
    fn test_personal_fields_and_defaults() {
        let out = substitute_template_variables("$name$ | $email$ | $phone$ | $location$", &sample());
        assert_eq!(out, "Jane Doe | jane@example.com | (123) 456-7890 | City, State");

        let empty = substitute_template_variables("$name$ -- $summary$", &ParsedResume::default());
        assert_eq!(empty, "Your Name -- Professional summary goes here.");
    }

    #[test]
    fn test_links_expand_handles() {
        let out = substitute_template_variables("$linkedin$ $github$ $website$", &sample());
        assert_eq!(
            out,
            r"\href{https://linkedin.com/in/janedoe}{LinkedIn} \href{https://github.com/janedoe}{GitHub} "
        );
    }

    #[test]
    fn test_sections_are_escaped() {
        let out = substitute_template_variables("$work_experience$$skills$$projects$", &sample());
        assert!(out.starts_with("\\section{Work Experience}\n\\textbf{Experience}\\\\\n"));
        assert!(out.contains(r"Cut costs by 40\% at R\&D"));
        assert!(out.ends_with("\\section{Skills}\nC\\#, Rust"));
    }

    #[test]
    fn test_single_pass_never_rescans_values() {
        let mut resume = sample();
        resume.summary = "literal $name$ marker".to_string();
        let out = substitute_template_variables("$summary$ $unknown$", &resume);
        assert_eq!(out, r"literal \$name\$ marker $unknown$");
    }

    #[test]
    fn test_certifications_line() {
        let certs = vec![CertificationEntry {
            name: "CKA".to_string(),
            issuer: "CNCF".to_string(),
            date: "2022".to_string(),
        }];
        assert_eq!(
            format_certifications(&certs),
            "\\section{Certifications}\n\\textbf{CKA} - CNCF (2022)\\\\\n"
        );
        assert_eq!(format_certifications(&[]), "");
    }

    #[test]
    fn test_escape_latex_specials() {
        assert_eq!(escape_latex(r"a_b {c} ~ ^ \"), r"a\_b \{c\} \textasciitilde{} \textasciicircum{} \textbackslash{}");
    }
}
