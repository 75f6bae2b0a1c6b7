//! Shared content tree: *what* each section says, independent of how it is drawn.
//!
//! The screen preview and the PDF compositor both render from these structs, so field
//! selection and omission rules live in exactly one place.

use serde::Serialize;

use crate::models::resume::{is_blank, ResumeData};
use crate::sections::model::SectionId;

/// Separator between contact fields in the header line.
pub const CONTACT_SEPARATOR: &str = " | ";
/// Separator between the two sides of a date range.
pub const DATE_RANGE_SEPARATOR: &str = " – ";
/// Glyph drawn before the first line of each bullet.
pub const BULLET_GLYPH: &str = "•";

const BULLET_MARKERS: &[char] = &['•', '-', '*', '–', '·', '▪'];

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Name block at the top of page one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderContent {
    pub name: String,
    /// Non-empty contact fields, in display order.
    pub contact_fields: Vec<String>,
}

impl HeaderContent {
    pub fn contact_line(&self) -> String {
        self.contact_fields.join(CONTACT_SEPARATOR)
    }
}

/// A left-aligned value paired with a right-aligned value on the same line.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LinePair {
    pub left: String,
    pub right: String,
}

impl LinePair {
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

/// One dated item: a job, a degree, a project, a certification or an award.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryBlock {
    /// Drawn bold. `None` when both sides are blank.
    pub heading: Option<LinePair>,
    /// Drawn italic. Only experience and education have one.
    pub subheading: Option<LinePair>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum SectionBody {
    /// Free-text paragraphs (summary, skills).
    Text(Vec<String>),
    Entries(Vec<EntryBlock>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionContent {
    pub id: SectionId,
    pub title: String,
    pub body: SectionBody,
}

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

pub fn build_header(data: &ResumeData) -> HeaderContent {
    let c = &data.contact;
    let location = join_non_blank(&[c.city.as_str(), c.state.as_str()], ", ");

    let contact_fields = [
        location,
        c.email.trim().to_string(),
        c.phone.trim().to_string(),
        format_url(&c.linkedin),
        format_url(&c.website),
    ]
    .into_iter()
    .filter(|f| !f.is_empty())
    .collect();

    HeaderContent {
        name: c.full_name.trim().to_string(),
        contact_fields,
    }
}

pub fn build_section(id: SectionId, data: &ResumeData) -> SectionContent {
    let body = match id {
        SectionId::Summary => SectionBody::Text(paragraphs(&data.summary)),
        SectionId::Skills => SectionBody::Text(paragraphs(&data.skills)),
        SectionId::Experience => SectionBody::Entries(
            data.experience
                .iter()
                .filter(|e| e.is_meaningful())
                .map(|e| EntryBlock {
                    heading: non_empty(pair(&e.role, &e.location)),
                    subheading: subheading(
                        e.company.trim().to_string(),
                        date_range(&e.start_date, &e.end_date, e.is_current),
                    ),
                    bullets: split_bullets(&e.bullets),
                })
                .collect(),
        ),
        // School + location first, degree + dates second.
        SectionId::Education => SectionBody::Entries(
            data.education
                .iter()
                .filter(|e| e.is_meaningful())
                .map(|e| EntryBlock {
                    heading: non_empty(pair(&e.school, &e.location)),
                    subheading: subheading(
                        degree_line(&e.degree, &e.minor, &e.gpa),
                        date_range(&e.start_date, &e.end_date, false),
                    ),
                    bullets: split_bullets(&e.bullets),
                })
                .collect(),
        ),
        SectionId::Projects => SectionBody::Entries(
            data.projects
                .iter()
                .filter(|e| e.is_meaningful())
                .map(|e| dated_item(&e.name, "", &e.date, &e.relevance))
                .collect(),
        ),
        SectionId::Certifications => SectionBody::Entries(
            data.certifications
                .iter()
                .filter(|e| e.is_meaningful())
                .map(|e| dated_item(&e.name, &e.organization, &e.date, &e.relevance))
                .collect(),
        ),
        SectionId::Awards => SectionBody::Entries(
            data.awards
                .iter()
                .filter(|e| e.is_meaningful())
                .map(|e| dated_item(&e.name, &e.organization, &e.date, &e.relevance))
                .collect(),
        ),
    };

    SectionContent {
        id,
        title: id.title().to_string(),
        body,
    }
}

/// Builds the content for every section in `order`, preserving that order.
pub fn build_sections_content(order: &[SectionId], data: &ResumeData) -> Vec<SectionContent> {
    order.iter().map(|id| build_section(*id, data)).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Field helpers
// ────────────────────────────────────────────────────────────────────────────

fn pair(left: &str, right: &str) -> LinePair {
    LinePair {
        left: left.trim().to_string(),
        right: right.trim().to_string(),
    }
}

/// A row with nothing on either side is dropped rather than drawn as a blank line.
fn non_empty(pair: LinePair) -> Option<LinePair> {
    (!pair.is_empty()).then_some(pair)
}

fn subheading(left: String, right: String) -> Option<LinePair> {
    non_empty(LinePair { left, right })
}

fn dated_item(name: &str, organization: &str, date: &str, relevance: &str) -> EntryBlock {
    EntryBlock {
        heading: non_empty(LinePair {
            left: join_non_blank(&[name, organization], ", "),
            right: date.trim().to_string(),
        }),
        subheading: None,
        bullets: split_bullets(relevance),
    }
}

fn join_non_blank(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// `start – end`, omitting blank sides. A current position ends at "Present".
pub fn date_range(start: &str, end: &str, is_current: bool) -> String {
    let end = if is_current { "Present" } else { end };
    join_non_blank(&[start, end], DATE_RANGE_SEPARATOR)
}

/// `degree, minor | GPA: x`, each part optional.
pub fn degree_line(degree: &str, minor: &str, gpa: &str) -> String {
    let studies = join_non_blank(&[degree, minor], ", ");
    if is_blank(gpa) {
        return studies;
    }
    let gpa = format!("GPA: {}", gpa.trim());
    if studies.is_empty() {
        gpa
    } else {
        format!("{studies} | {gpa}")
    }
}

/// Strips the scheme, a leading `www.` and trailing slashes from a profile URL.
pub fn format_url(raw: &str) -> String {
    let s = raw.trim();
    let s = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
        .unwrap_or(s);
    let s = s.strip_prefix("www.").unwrap_or(s);
    s.trim_end_matches('/').to_string()
}

/// Splits raw bullet text into one string per logical bullet.
pub fn split_bullets(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| BULLET_MARKERS.contains(&c) || c.is_whitespace())
                .trim_end()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

fn paragraphs(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
