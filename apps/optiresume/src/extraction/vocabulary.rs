//! Static keyword data shared by every extraction call. Fixed at build time.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Skill keywords, matched case-insensitively as substrings of the résumé text.
/// Output order follows this list.
pub const SKILL_VOCABULARY: &[&str] = &[
    "Python",
    "JavaScript",
    "Java",
    "C++",
    "C#",
    "React",
    "Node.js",
    "Angular",
    "Vue.js",
    "HTML",
    "CSS",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "AWS",
    "Azure",
    "Docker",
    "Kubernetes",
    "Git",
    "Linux",
    "Windows",
    "Machine Learning",
    "AI",
    "Data Science",
    "Project Management",
    "Agile",
    "Scrum",
    "Leadership",
    "Communication",
    "Teamwork",
];

pub const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "b.sc",
    "m.sc",
    "b.tech",
    "m.tech",
    "b.e.",
    "m.e.",
    "mba",
    "bachelors",
    "masters",
    "doctorate",
];

pub const EXPERIENCE_HEADERS: &[&str] = &[
    "experience",
    "employment",
    "work history",
    "professional experience",
];

pub const EDUCATION_HEADERS: &[&str] = &["education", "academic", "qualifications", "degrees"];

/// Résumé boilerplate that is never part of a person's name.
pub static BLACKLIST_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "resume",
        "cv",
        "curriculum",
        "vitae",
        "portfolio",
        "streamlit",
        "github",
        "linkedin",
        "email",
        "phone",
    ]
    .into_iter()
    .collect()
});

/// Technology and role words; a line made of these is a headline, not a name.
pub static TECH_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "python",
        "java",
        "javascript",
        "typescript",
        "react",
        "node",
        "aws",
        "azure",
        "gcp",
        "sql",
        "mysql",
        "postgres",
        "mongodb",
        "docker",
        "kubernetes",
        "tensorflow",
        "pytorch",
        "ml",
        "ai",
        "nlp",
        "devops",
        "engineer",
        "developer",
        "data",
        "science",
        "datascientist",
        "frontend",
        "backend",
        "fullstack",
        "resume",
        "cv",
    ]
    .into_iter()
    .collect()
});

/// True when a lowercased token may not appear in a name.
pub fn is_reserved_token(lowercase: &str) -> bool {
    BLACKLIST_TOKENS.contains(lowercase) || TECH_TOKENS.contains(lowercase)
}
