//! Off-screen measurement pass for the screen preview.
//!
//! Estimates the rendered pixel height of the header and of each section by wrapping
//! their text at the real content width with the Helvetica metric tables. The HTML
//! preview renderer takes its CSS box sizes from the same `ScreenStyle`, so the
//! estimate and the rendered page describe the same boxes.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{get_metrics, FontStyle};
use crate::layout::page::PageFormat;
use crate::layout::wrap::wrap_text;
use crate::sections::content::{EntryBlock, HeaderContent, SectionBody, SectionContent};

/// Box model of the on-screen resume page, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenStyle {
    pub page_width: f32,
    pub page_height: f32,
    /// Padding on all four sides of a page.
    pub padding: f32,
    pub name_size: f32,
    pub contact_size: f32,
    pub title_size: f32,
    pub body_size: f32,
    /// CSS `line-height` multiplier.
    pub line_height: f32,
    /// Space below the header block.
    pub header_gap: f32,
    /// Thickness of the rule under a section title.
    pub title_rule: f32,
    /// Space between the title rule and the section body.
    pub title_gap: f32,
    pub bullet_indent: f32,
    /// Space after each entry.
    pub entry_gap: f32,
    /// Space after each section.
    pub section_gap: f32,
}

impl ScreenStyle {
    pub fn for_format(format: PageFormat) -> Self {
        let (page_width, page_height) = format.size_px();
        ScreenStyle {
            page_width,
            page_height,
            padding: 48.0,
            name_size: 26.0,
            contact_size: 13.0,
            title_size: 15.0,
            body_size: 13.5,
            line_height: 1.35,
            header_gap: 12.0,
            title_rule: 1.0,
            title_gap: 6.0,
            bullet_indent: 18.0,
            entry_gap: 8.0,
            section_gap: 14.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.padding
    }

    /// Page height available for content.
    pub fn usable_height(&self) -> f32 {
        self.page_height - 2.0 * self.padding
    }

    pub fn line(&self, size: f32) -> f32 {
        size * self.line_height
    }

    fn lines(&self, text: &str, style: FontStyle, size: f32, width: f32) -> usize {
        wrap_text(text, get_metrics(style), size, width).len()
    }
}

/// Heights read back from the measurement pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub header_height: f32,
    /// One height per section, in layout order.
    pub section_heights: Vec<f32>,
}

pub fn measure_header(header: &HeaderContent, style: &ScreenStyle) -> f32 {
    let width = style.content_width();
    let name_lines = style.lines(&header.name, FontStyle::Bold, style.name_size, width);
    let contact_lines = style.lines(
        &header.contact_line(),
        FontStyle::Regular,
        style.contact_size,
        width,
    );
    if name_lines + contact_lines == 0 {
        return 0.0;
    }
    name_lines as f32 * style.line(style.name_size)
        + contact_lines as f32 * style.line(style.contact_size)
        + style.header_gap
}

pub fn measure_section(section: &SectionContent, style: &ScreenStyle) -> f32 {
    let width = style.content_width();
    let body_line = style.line(style.body_size);
    let title = style.line(style.title_size) + style.title_rule + style.title_gap;

    let body: f32 = match &section.body {
        SectionBody::Text(paragraphs) => paragraphs
            .iter()
            .map(|p| style.lines(p, FontStyle::Regular, style.body_size, width) as f32 * body_line)
            .sum(),
        SectionBody::Entries(entries) => entries.iter().map(|e| entry_height(e, style)).sum(),
    };

    title + body + style.section_gap
}

fn entry_height(entry: &EntryBlock, style: &ScreenStyle) -> f32 {
    let body_line = style.line(style.body_size);
    let bullet_width = style.content_width() - style.bullet_indent;

    let heading_lines =
        usize::from(entry.heading.is_some()) + usize::from(entry.subheading.is_some());
    let bullet_lines: usize = entry
        .bullets
        .iter()
        .map(|b| style.lines(b, FontStyle::Regular, style.body_size, bullet_width))
        .sum();

    (heading_lines + bullet_lines) as f32 * body_line + style.entry_gap
}

/// Measures the header and every section.
///
/// Returns `None` when there is nothing to measure, which callers treat as
/// "no pages this pass".
pub fn measure_document(
    header: &HeaderContent,
    sections: &[SectionContent],
    style: &ScreenStyle,
) -> Option<Measurement> {
    if sections.is_empty() {
        return None;
    }
    Some(Measurement {
        header_height: measure_header(header, style),
        section_heights: sections.iter().map(|s| measure_section(s, style)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::content::LinePair;
    use crate::sections::model::SectionId;

    fn style() -> ScreenStyle {
        ScreenStyle::for_format(PageFormat::Letter)
    }

    fn text_section(paragraphs: &[&str]) -> SectionContent {
        SectionContent {
            id: SectionId::Summary,
            title: "Summary".to_string(),
            body: SectionBody::Text(paragraphs.iter().map(|p| p.to_string()).collect()),
        }
    }

    #[test]
    fn test_empty_header_has_no_height() {
        let header = HeaderContent {
            name: String::new(),
            contact_fields: vec![],
        };
        assert_eq!(measure_header(&header, &style()), 0.0);
    }

    #[test]
    fn test_header_height_counts_both_lines() {
        let s = style();
        let header = HeaderContent {
            name: "Jane Doe".to_string(),
            contact_fields: vec!["jane@example.com".to_string()],
        };
        let expected = s.line(s.name_size) + s.line(s.contact_size) + s.header_gap;
        assert!((measure_header(&header, &s) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_longer_text_is_taller() {
        let s = style();
        let short = measure_section(&text_section(&["Short summary."]), &s);
        let long_text = "Built and operated distributed systems at scale. ".repeat(20);
        let long = measure_section(&text_section(&[long_text.as_str()]), &s);
        assert!(long > short, "wrapped text must add height ({long} vs {short})");
    }

    #[test]
    fn test_one_line_section_height() {
        let s = style();
        let h = measure_section(&text_section(&["Rust"]), &s);
        let expected = s.line(s.title_size)
            + s.title_rule
            + s.title_gap
            + s.line(s.body_size)
            + s.section_gap;
        assert!((h - expected).abs() < 1e-3, "got {h}, expected {expected}");
    }

    #[test]
    fn test_entry_with_subheading_and_bullets() {
        let s = style();
        let entry = EntryBlock {
            heading: Some(LinePair {
                left: "Engineer".to_string(),
                right: "Remote".to_string(),
            }),
            subheading: Some(LinePair::default()),
            bullets: vec!["One".to_string(), "Two".to_string()],
        };
        let expected = 4.0 * s.line(s.body_size) + s.entry_gap;
        assert!((entry_height(&entry, &s) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_entry_without_heading_counts_only_bullets() {
        let s = style();
        let entry = EntryBlock {
            heading: None,
            subheading: None,
            bullets: vec!["Wrote a parser".to_string()],
        };
        let expected = s.line(s.body_size) + s.entry_gap;
        assert!((entry_height(&entry, &s) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_no_sections_no_measurement() {
        let header = HeaderContent {
            name: "Jane".to_string(),
            contact_fields: vec![],
        };
        assert!(measure_document(&header, &[], &style()).is_none());
    }

    #[test]
    fn test_measurement_is_deterministic() {
        let header = HeaderContent {
            name: "Jane".to_string(),
            contact_fields: vec!["jane@example.com".to_string()],
        };
        let sections = vec![text_section(&["a b c"]), text_section(&["d e f"])];
        let first = measure_document(&header, &sections, &style());
        let second = measure_document(&header, &sections, &style());
        assert_eq!(first, second);
        assert_eq!(first.map(|m| m.section_heights.len()), Some(2));
    }
}
