//! Section presence and the authoritative layout order.

use serde::{Deserialize, Serialize};

use crate::models::resume::{is_blank, ResumeData};

// ────────────────────────────────────────────────────────────────────────────
// Section kinds
// ────────────────────────────────────────────────────────────────────────────

/// The seven fixed resume section kinds, declared in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Summary,
    Experience,
    Education,
    Projects,
    Certifications,
    Awards,
    Skills,
}

impl SectionId {
    /// Canonical default order.
    pub const ALL: [SectionId; 7] = [
        SectionId::Summary,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Projects,
        SectionId::Certifications,
        SectionId::Awards,
        SectionId::Skills,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Summary => "Summary",
            SectionId::Experience => "Experience",
            SectionId::Education => "Education",
            SectionId::Projects => "Projects",
            SectionId::Certifications => "Certifications",
            SectionId::Awards => "Awards",
            SectionId::Skills => "Skills",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Summary => "summary",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Projects => "projects",
            SectionId::Certifications => "certifications",
            SectionId::Awards => "awards",
            SectionId::Skills => "skills",
        }
    }

    fn canonical_index(&self) -> usize {
        *self as usize
    }

    /// Whether the resume has any meaningful content for this section.
    pub fn is_present(&self, data: &ResumeData) -> bool {
        match self {
            SectionId::Summary => !is_blank(&data.summary),
            SectionId::Skills => !is_blank(&data.skills),
            SectionId::Experience => data.experience.iter().any(|e| e.is_meaningful()),
            SectionId::Education => data.education.iter().any(|e| e.is_meaningful()),
            SectionId::Projects => data.projects.iter().any(|e| e.is_meaningful()),
            SectionId::Certifications => data.certifications.iter().any(|e| e.is_meaningful()),
            SectionId::Awards => data.awards.iter().any(|e| e.is_meaningful()),
        }
    }
}

/// Derived view of one section kind. Rebuilt on every data change, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub present: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

/// All seven sections in canonical order, each flagged with its presence.
pub fn build_sections(data: &ResumeData) -> Vec<Section> {
    SectionId::ALL
        .iter()
        .map(|id| Section {
            id: *id,
            title: id.title().to_string(),
            present: id.is_present(data),
        })
        .collect()
}

/// Present sections in canonical order.
pub fn present_sections(data: &ResumeData) -> Vec<SectionId> {
    SectionId::ALL
        .into_iter()
        .filter(|id| id.is_present(data))
        .collect()
}

/// Recomputes the layout order after the resume data changed.
///
/// Sections from `previous` that are still present keep their relative (user-chosen)
/// order. Sections that are no longer present are dropped. Newly present sections are
/// inserted at their canonical index, clamped to the current length. Duplicates in
/// `previous` are ignored after their first occurrence.
pub fn sync_order(previous: &[SectionId], data: &ResumeData) -> Vec<SectionId> {
    let mut order: Vec<SectionId> = Vec::with_capacity(SectionId::ALL.len());
    for id in previous {
        if id.is_present(data) && !order.contains(id) {
            order.push(*id);
        }
    }

    for id in present_sections(data) {
        if !order.contains(&id) {
            let at = id.canonical_index().min(order.len());
            order.insert(at, id);
        }
    }
    order
}

/// Layout order for a one-off render with an explicit order.
///
/// Requested ids that are present lead, in the requested order and without duplicates.
/// Present sections the request left out follow in canonical order.
pub fn requested_order(requested: &[SectionId], data: &ResumeData) -> Vec<SectionId> {
    let mut order: Vec<SectionId> = Vec::with_capacity(SectionId::ALL.len());
    for id in requested.iter().chain(SectionId::ALL.iter()) {
        if id.is_present(data) && !order.contains(id) {
            order.push(*id);
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{AwardEntry, EducationEntry, ExperienceEntry, ProjectEntry};

    fn full_resume() -> ResumeData {
        ResumeData {
            summary: "Systems engineer".to_string(),
            skills: "Rust, Go".to_string(),
            experience: vec![ExperienceEntry {
                role: "Engineer".to_string(),
                company: "Acme".to_string(),
                ..Default::default()
            }],
            education: vec![EducationEntry {
                school: "MIT".to_string(),
                ..Default::default()
            }],
            projects: vec![ProjectEntry {
                name: "Compiler".to_string(),
                ..Default::default()
            }],
            awards: vec![AwardEntry {
                name: "Prize".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_default_order_is_canonical() {
        let order = present_sections(&full_resume());
        assert_eq!(
            order,
            vec![
                SectionId::Summary,
                SectionId::Experience,
                SectionId::Education,
                SectionId::Projects,
                SectionId::Awards,
                SectionId::Skills,
            ],
            "certifications has no entries and must be absent"
        );
    }

    #[test]
    fn test_whitespace_only_text_is_absent() {
        let data = ResumeData {
            summary: "   \n\t".to_string(),
            skills: " ".to_string(),
            ..Default::default()
        };
        assert!(present_sections(&data).is_empty());
    }

    #[test]
    fn test_blank_placeholder_entry_does_not_count() {
        let data = ResumeData {
            experience: vec![ExperienceEntry::default(), ExperienceEntry::default()],
            ..Default::default()
        };
        assert!(!SectionId::Experience.is_present(&data));

        let data = ResumeData {
            experience: vec![
                ExperienceEntry::default(),
                ExperienceEntry {
                    role: "Intern".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert!(SectionId::Experience.is_present(&data));
    }

    #[test]
    fn test_each_present_section_appears_exactly_once() {
        let data = full_resume();
        let order = present_sections(&data);
        for id in SectionId::ALL {
            let count = order.iter().filter(|s| **s == id).count();
            let expected = usize::from(id.is_present(&data));
            assert_eq!(count, expected, "{id:?} should appear {expected} time(s)");
        }
    }

    #[test]
    fn test_build_sections_flags_presence() {
        let sections = build_sections(&full_resume());
        assert_eq!(sections.len(), 7);
        let certs = sections
            .iter()
            .find(|s| s.id == SectionId::Certifications)
            .unwrap();
        assert!(!certs.present);
        assert_eq!(certs.title, "Certifications");
    }

    #[test]
    fn test_sync_order_empty_previous_is_canonical() {
        let data = full_resume();
        assert_eq!(sync_order(&[], &data), present_sections(&data));
    }

    #[test]
    fn test_sync_order_keeps_manual_order() {
        let data = full_resume();
        let manual = vec![
            SectionId::Skills,
            SectionId::Summary,
            SectionId::Experience,
            SectionId::Education,
            SectionId::Projects,
            SectionId::Awards,
        ];
        assert_eq!(sync_order(&manual, &data), manual);
    }

    #[test]
    fn test_sync_order_drops_removed_and_inserts_new() {
        let mut data = full_resume();
        let manual = vec![
            SectionId::Skills,
            SectionId::Summary,
            SectionId::Experience,
            SectionId::Education,
            SectionId::Projects,
            SectionId::Awards,
        ];

        // Summary cleared, certifications added.
        data.summary.clear();
        data.certifications.push(crate::models::resume::CertificationEntry {
            name: "CKA".to_string(),
            ..Default::default()
        });

        let order = sync_order(&manual, &data);
        assert_eq!(
            order,
            vec![
                SectionId::Skills,
                SectionId::Experience,
                SectionId::Education,
                SectionId::Projects,
                SectionId::Certifications,
                SectionId::Awards,
            ]
        );
    }

    #[test]
    fn test_sync_order_ignores_duplicates_and_absent_ids() {
        let data = full_resume();
        let messy = vec![
            SectionId::Skills,
            SectionId::Skills,
            SectionId::Certifications,
        ];
        let order = sync_order(&messy, &data);
        assert_eq!(order.len(), present_sections(&data).len());
        assert_eq!(
            order.iter().filter(|id| **id == SectionId::Skills).count(),
            1,
            "duplicates collapse to one entry"
        );
        assert!(!order.contains(&SectionId::Certifications));
        // Newly present sections go back to their canonical slot.
        assert_eq!(order[0], SectionId::Summary);
    }

    #[test]
    fn test_requested_order_leads_with_requested_ids() {
        let data = full_resume();
        let order = requested_order(
            &[SectionId::Skills, SectionId::Skills, SectionId::Certifications],
            &data,
        );
        assert_eq!(order[0], SectionId::Skills);
        let mut rest = present_sections(&data);
        rest.retain(|id| *id != SectionId::Skills);
        assert_eq!(order[1..], rest[..], "missing sections follow in canonical order");
    }

    #[test]
    fn test_requested_order_empty_is_canonical() {
        let data = full_resume();
        assert_eq!(requested_order(&[], &data), present_sections(&data));
    }

    #[test]
    fn test_section_id_serializes_lowercase() {
        let json = serde_json::to_string(&SectionId::Certifications).unwrap();
        assert_eq!(json, "\"certifications\"");
    }
}
