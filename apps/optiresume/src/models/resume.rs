use serde::{Deserialize, Serialize};

pub const SKILL_CATEGORY_TECHNICAL: &str = "technical";
pub const SKILL_PROFICIENCY_INTERMEDIATE: &str = "intermediate";

/// Confidence when both a name and an email were extracted.
pub const CONFIDENCE_HIGH: f64 = 0.7;
/// Confidence for every other outcome.
pub const CONFIDENCE_LOW: f64 = 0.3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub title: String,
    pub description: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillTag {
    pub name: String,
    pub category: String,
    pub proficiency: String,
}

impl SkillTag {
    /// Skills found by keyword presence carry no weighting.
    pub fn technical(name: impl Into<String>) -> Self {
        SkillTag {
            name: name.into(),
            category: SKILL_CATEGORY_TECHNICAL.to_string(),
            proficiency: SKILL_PROFICIENCY_INTERMEDIATE.to_string(),
        }
    }
}

impl Default for SkillTag {
    fn default() -> Self {
        SkillTag::technical("")
    }
}

/// The structured résumé record. Every key is always present when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParsedResume {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub education: Vec<EducationEntry>,
    pub work_experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<SkillTag>,
    pub certifications: Vec<CertificationEntry>,
}

/// Output of one extraction call: the record, the text it was derived from, and
/// the two-tier quality signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub parsed: ParsedResume,
    pub raw_text: String,
    pub confidence: f64,
    /// Organizations reported by the entity recognizer, if one is installed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organizations: Vec<String>,
}

pub fn confidence_for(name: &str, email: &str) -> f64 {
    if !name.is_empty() && !email.is_empty() {
        CONFIDENCE_HIGH
    } else {
        CONFIDENCE_LOW
    }
}
