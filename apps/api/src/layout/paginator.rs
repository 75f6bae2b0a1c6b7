//! Screen Paginator — packs measured sections into fixed-height preview pages.
//!
//! # Packing rule
//! Greedy and order-preserving. The running height starts at the header height. A page
//! is closed only when the next section would push it past the usable height *and* the
//! page already holds a section; the new page starts from zero. Sections are never
//! split, so a section taller than a page sits alone on its own page and overflows it.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::layout::measure::{measure_document, Measurement, ScreenStyle};
use crate::layout::page::PageFormat;
use crate::models::ResumeData;
use crate::sections::content::{build_header, build_sections_content};
use crate::sections::model::SectionId;

/// One preview page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub index: usize,
    /// Only the first page carries the name/contact header.
    pub has_header: bool,
    pub sections: Vec<SectionId>,
}

/// A section with its measured height, as shown in the preview response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredSection {
    pub id: SectionId,
    pub title: String,
    pub height: f32,
}

/// Everything the client needs to draw the paged preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenPreview {
    pub format: PageFormat,
    pub usable_height: f32,
    pub header_height: f32,
    pub sections: Vec<MeasuredSection>,
    pub pages: Vec<Page>,
}

/// Greedy packing over raw heights. Returns section indices grouped by page.
pub fn pack_pages(heights: &[f32], header_height: f32, usable_height: f32) -> Vec<Vec<usize>> {
    let mut pages: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut used = header_height;

    for (i, &h) in heights.iter().enumerate() {
        if used + h > usable_height && !current.is_empty() {
            pages.push(std::mem::take(&mut current));
            used = 0.0;
        }
        current.push(i);
        used += h;
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

/// Paginates `sections` using the heights from a measurement pass.
///
/// Returns no pages when the measurement is missing or does not line up with the
/// section list; the caller renders nothing and tries again on the next pass.
pub fn paginate(
    sections: &[SectionId],
    measurement: Option<&Measurement>,
    usable_height: f32,
) -> Vec<Page> {
    let Some(m) = measurement else {
        return Vec::new();
    };
    if m.section_heights.len() != sections.len() {
        debug!(
            sections = sections.len(),
            heights = m.section_heights.len(),
            "measurement does not match section list, skipping pagination"
        );
        return Vec::new();
    }

    for (id, h) in sections.iter().zip(&m.section_heights) {
        if *h > usable_height {
            warn!(
                section = id.as_str(),
                height = *h,
                usable_height,
                "section is taller than a page and will overflow it"
            );
        }
    }

    pack_pages(&m.section_heights, m.header_height, usable_height)
        .into_iter()
        .enumerate()
        .map(|(index, members)| Page {
            index,
            has_header: index == 0,
            sections: members.into_iter().map(|i| sections[i]).collect(),
        })
        .collect()
}

/// Runs a full screen layout pass: content → measurement → pagination.
pub fn build_preview(
    data: &ResumeData,
    order: &[SectionId],
    format: PageFormat,
    style: &ScreenStyle,
) -> ScreenPreview {
    let header = build_header(data);
    let content = build_sections_content(order, data);
    let measurement = measure_document(&header, &content, style);
    let usable_height = style.usable_height();
    let pages = paginate(order, measurement.as_ref(), usable_height);

    debug!(
        sections = order.len(),
        pages = pages.len(),
        "screen layout pass complete"
    );

    let sections = match &measurement {
        Some(m) => content
            .iter()
            .zip(&m.section_heights)
            .map(|(c, h)| MeasuredSection {
                id: c.id,
                title: c.title.clone(),
                height: *h,
            })
            .collect(),
        None => Vec::new(),
    };

    ScreenPreview {
        format,
        usable_height,
        header_height: measurement.as_ref().map_or(0.0, |m| m.header_height),
        sections,
        pages,
    }
}
