use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Returns true when the string has no visible content.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// The resume as edited by the user. Source of truth for every layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    #[serde(default, deserialize_with = "lenient::object")]
    pub contact: ContactInfo,
    #[serde(default, deserialize_with = "lenient::string")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub skills: String,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub projects: Vec<ProjectEntry>,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub certifications: Vec<CertificationEntry>,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub awards: Vec<AwardEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default, deserialize_with = "lenient::string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub linkedin: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub website: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub end_date: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_current: bool,
    /// Newline-separated bullet text, possibly with leading bullet markers.
    #[serde(default, deserialize_with = "lenient::string")]
    pub bullets: String,
}

impl ExperienceEntry {
    /// An all-blank placeholder row does not count as experience.
    pub fn is_meaningful(&self) -> bool {
        !is_blank(&self.role) || !is_blank(&self.company)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub school: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub minor: String,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub gpa: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub end_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub bullets: String,
}

impl EducationEntry {
    pub fn is_meaningful(&self) -> bool {
        !is_blank(&self.school) || !is_blank(&self.degree)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub relevance: String,
}

impl ProjectEntry {
    pub fn is_meaningful(&self) -> bool {
        !is_blank(&self.name) || !is_blank(&self.relevance)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationEntry {
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub organization: String,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub relevance: String,
}

impl CertificationEntry {
    pub fn is_meaningful(&self) -> bool {
        !is_blank(&self.name) || !is_blank(&self.organization)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardEntry {
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub organization: String,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub relevance: String,
}

impl AwardEntry {
    pub fn is_meaningful(&self) -> bool {
        !is_blank(&self.name) || !is_blank(&self.organization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_case_fields_deserialize() {
        let data: ResumeData = serde_json::from_value(json!({
            "contact": { "fullName": "Ada Lovelace", "email": "ada@example.com" },
            "experience": [{
                "id": "e1",
                "role": "Engineer",
                "company": "Analytical Engines",
                "startDate": "2020",
                "endDate": "",
                "isCurrent": true,
                "bullets": "Built things"
            }]
        }))
        .unwrap();

        assert_eq!(data.contact.full_name, "Ada Lovelace");
        assert_eq!(data.experience.len(), 1);
        assert!(data.experience[0].is_current);
        assert_eq!(data.experience[0].start_date, "2020");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let data: ResumeData = serde_json::from_value(json!({})).unwrap();
        assert_eq!(data, ResumeData::default());
    }

    #[test]
    fn test_non_string_bullets_become_empty() {
        let data: ResumeData = serde_json::from_value(json!({
            "experience": [{ "role": "Engineer", "bullets": ["not", "a", "string"] }],
            "education": [{ "school": "MIT", "bullets": 42 }]
        }))
        .unwrap();

        assert_eq!(data.experience[0].bullets, "");
        assert_eq!(data.education[0].bullets, "");
    }

    #[test]
    fn test_numeric_gpa_and_dates_are_kept() {
        let data: ResumeData = serde_json::from_value(json!({
            "education": [{ "school": "MIT", "gpa": 3.9, "startDate": 2016, "endDate": 2020 }]
        }))
        .unwrap();

        assert_eq!(data.education[0].gpa, "3.9");
        assert_eq!(data.education[0].start_date, "2016");
        assert_eq!(data.education[0].end_date, "2020");
    }

    #[test]
    fn test_malformed_collections_are_tolerated() {
        let data: ResumeData = serde_json::from_value(json!({
            "contact": "nope",
            "summary": null,
            "experience": "not an array",
            "projects": [null, 7, { "name": "Compiler" }],
            "awards": [{ "name": "Prize", "isCurrent": "yes" }]
        }))
        .unwrap();

        assert_eq!(data.contact, ContactInfo::default());
        assert_eq!(data.summary, "");
        assert!(data.experience.is_empty());
        assert_eq!(data.projects.len(), 1, "non-object elements are skipped");
        assert_eq!(data.projects[0].name, "Compiler");
        assert_eq!(data.awards.len(), 1);
    }

    #[test]
    fn test_placeholder_entries_are_not_meaningful() {
        let blank = ExperienceEntry {
            location: "Remote".to_string(),
            bullets: "did work".to_string(),
            ..Default::default()
        };
        assert!(!blank.is_meaningful());

        let real = ExperienceEntry {
            company: "Acme".to_string(),
            ..Default::default()
        };
        assert!(real.is_meaningful());

        assert!(!EducationEntry {
            gpa: "4.0".to_string(),
            ..Default::default()
        }
        .is_meaningful());
        assert!(CertificationEntry {
            organization: "AWS".to_string(),
            ..Default::default()
        }
        .is_meaningful());
    }
}
