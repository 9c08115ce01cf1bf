//! Job-description skill extraction. Uses the same vocabulary and substring rule
//! as résumé skills so both sides of a match speak the same terms.

use tracing::debug;

use crate::extraction::fields::extract_skills;

/// Vocabulary terms required by a job description, in vocabulary order.
pub fn extract_job_skills(job_description: &str) -> Vec<String> {
    let skills = extract_skills(job_description);
    debug!("Job description requires {} known skill(s)", skills.len());
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKEND_JD: &str = r#"
        Senior Backend Engineer — Payments Platform
        Required: Python, PostgreSQL and Docker in production.
        Nice to have: Kubernetes, AWS. Agile team, strong communication.
    "#;

    #[test]
    fn test_required_skills_follow_vocabulary_order() {
        let skills = extract_job_skills(BACKEND_JD);
        assert_eq!(
            skills,
            vec![
                "Python",
                "SQL",
                "PostgreSQL",
                "AWS",
                "Docker",
                "Kubernetes",
                "Agile",
                "Communication",
            ]
        );
    }

    #[test]
    fn test_unrelated_text_requires_nothing() {
        assert!(extract_job_skills("Barista wanted, weekends only").is_empty());
    }
}
