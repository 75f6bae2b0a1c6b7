//! PDF Compositor — streams the resume onto a paginated document with a running cursor.
//!
//! Unlike the screen paginator, nothing is measured ahead of time. Every atomic visual
//! unit (name line, contact line, title with its rule, wrapped text line, entry heading,
//! bullet line) asks `check_page_break` for its height first, so no unit straddles a
//! page boundary.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::layout::font_metrics::FontStyle;
use crate::layout::page::PageFormat;
use crate::models::ResumeData;
use crate::pdf::printpdf_sink::PrintPdfSink;
use crate::pdf::sink::{DocumentSink, PdfArtifact, RenderError, TextAlign};
use crate::sections::content::{
    build_header, build_sections_content, EntryBlock, HeaderContent, LinePair, SectionBody,
    SectionContent, BULLET_GLYPH,
};
use crate::sections::model::SectionId;

/// Line height per point of font size before line spacing is applied.
const LINE_HEIGHT_FACTOR: f32 = 1.15;
/// Baseline position inside a line box, as a fraction of font size.
const BASELINE_RATIO: f32 = 0.85;

/// Fixed layout constants of the PDF output, in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub name_size: f32,
    pub contact_size: f32,
    pub title_size: f32,
    pub body_size: f32,
    pub line_spacing: f32,
    /// Left offset of bullet text from the margin.
    pub bullet_indent: f32,
    /// Left offset of the bullet glyph from the margin.
    pub bullet_offset: f32,
    pub header_gap: f32,
    /// Space after each entry.
    pub paragraph_gap: f32,
    /// Space after each section.
    pub section_gap: f32,
    pub rule_thickness: f32,
    /// Space between a section title's rule and its body.
    pub rule_gap: f32,
}

impl PdfLayout {
    pub fn for_format(format: PageFormat) -> Self {
        let (page_width, page_height) = format.size_pt();
        PdfLayout {
            page_width,
            page_height,
            margin: 40.0,
            name_size: 18.0,
            contact_size: 10.0,
            title_size: 12.0,
            body_size: 10.5,
            line_spacing: 1.1,
            bullet_indent: 14.0,
            bullet_offset: 4.0,
            header_gap: 8.0,
            paragraph_gap: 6.0,
            section_gap: 10.0,
            rule_thickness: 0.75,
            rule_gap: 5.0,
        }
    }

    pub fn line_height(&self, size: f32) -> f32 {
        size * LINE_HEIGHT_FACTOR * self.line_spacing
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Lowest y a unit may reach before it must move to a new page.
    pub fn bottom(&self) -> f32 {
        self.page_height - self.margin
    }
}

/// Write position. `y` is the top of the next unit to draw; units start at the margin.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub y: f32,
    pub page_count: usize,
}

pub struct PdfCompositor<'a, S: DocumentSink> {
    sink: S,
    layout: &'a PdfLayout,
    cursor: Cursor,
}

impl<'a, S: DocumentSink> PdfCompositor<'a, S> {
    pub fn new(sink: S, layout: &'a PdfLayout) -> Self {
        let page_count = sink.page_count();
        PdfCompositor {
            sink,
            layout,
            cursor: Cursor {
                y: layout.margin,
                page_count,
            },
        }
    }

    #[cfg(test)]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Starts a new page when `needed` more points would cross the bottom margin.
    ///
    /// A page that has nothing on it yet is never abandoned. Returns whether a page
    /// was added.
    pub fn check_page_break(&mut self, needed: f32) -> Result<bool, RenderError> {
        let fits = self.cursor.y + needed <= self.layout.bottom();
        if fits || self.cursor.y <= self.layout.margin {
            return Ok(false);
        }
        self.sink.add_page()?;
        self.cursor.page_count += 1;
        self.cursor.y = self.layout.margin;
        Ok(true)
    }

    /// Draws the header, then every section in order, and hands back the sink.
    pub fn compose(
        mut self,
        header: &HeaderContent,
        sections: &[SectionContent],
    ) -> Result<S, RenderError> {
        self.draw_header(header)?;
        for section in sections {
            self.draw_section(section)?;
        }
        debug!(
            sections = sections.len(),
            pages = self.cursor.page_count,
            "PDF composition complete"
        );
        Ok(self.sink)
    }

    fn baseline(&self, size: f32) -> f32 {
        self.cursor.y + size * BASELINE_RATIO
    }

    /// One line of text as an atomic unit.
    fn text_line(
        &mut self,
        text: &str,
        style: FontStyle,
        size: f32,
        x: f32,
        align: TextAlign,
    ) -> Result<(), RenderError> {
        let lh = self.layout.line_height(size);
        self.check_page_break(lh)?;
        self.sink.set_font(style, size);
        let y = self.baseline(size);
        self.sink.draw_text(text, x, y, align)?;
        self.cursor.y += lh;
        Ok(())
    }

    fn draw_header(&mut self, header: &HeaderContent) -> Result<(), RenderError> {
        let center = self.layout.page_width / 2.0;
        let width = self.layout.content_width();
        let mut drew = false;

        if !header.name.is_empty() {
            let size = self.layout.name_size;
            self.sink.set_font(FontStyle::Bold, size);
            for line in self.sink.split_text_to_size(&header.name, width) {
                self.text_line(&line, FontStyle::Bold, size, center, TextAlign::Center)?;
                drew = true;
            }
        }

        let size = self.layout.contact_size;
        self.sink.set_font(FontStyle::Regular, size);
        for line in self.sink.split_text_to_size(&header.contact_line(), width) {
            self.text_line(&line, FontStyle::Regular, size, center, TextAlign::Center)?;
            drew = true;
        }

        if drew {
            self.cursor.y += self.layout.header_gap;
        }
        Ok(())
    }

    fn draw_section(&mut self, section: &SectionContent) -> Result<(), RenderError> {
        let layout = self.layout;
        let title_lh = layout.line_height(layout.title_size);

        // Title and rule travel together.
        self.check_page_break(title_lh + layout.rule_gap)?;
        self.sink.set_font(FontStyle::Bold, layout.title_size);
        let y = self.baseline(layout.title_size);
        self.sink.draw_text(
            &section.title.to_uppercase(),
            layout.margin,
            y,
            TextAlign::Left,
        )?;
        self.cursor.y += title_lh;
        self.sink.draw_line(
            layout.margin,
            self.cursor.y,
            layout.page_width - layout.margin,
            self.cursor.y,
            layout.rule_thickness,
        )?;
        self.cursor.y += layout.rule_gap;

        match &section.body {
            SectionBody::Text(paragraphs) => {
                for p in paragraphs {
                    self.sink.set_font(FontStyle::Regular, layout.body_size);
                    for line in self.sink.split_text_to_size(p, layout.content_width()) {
                        self.text_line(
                            &line,
                            FontStyle::Regular,
                            layout.body_size,
                            layout.margin,
                            TextAlign::Left,
                        )?;
                    }
                }
            }
            SectionBody::Entries(entries) => {
                for entry in entries {
                    self.draw_entry(entry)?;
                }
            }
        }

        self.cursor.y += layout.section_gap;
        Ok(())
    }

    fn draw_entry(&mut self, entry: &EntryBlock) -> Result<(), RenderError> {
        if let Some(heading) = &entry.heading {
            self.draw_pair(heading, FontStyle::Bold)?;
        }
        if let Some(sub) = &entry.subheading {
            self.draw_pair(sub, FontStyle::Italic)?;
        }
        self.draw_bullets(&entry.bullets)?;
        self.cursor.y += self.layout.paragraph_gap;
        Ok(())
    }

    /// Left value and right-aligned value on one baseline.
    fn draw_pair(&mut self, pair: &LinePair, style: FontStyle) -> Result<(), RenderError> {
        let layout = self.layout;
        let size = layout.body_size;
        let lh = layout.line_height(size);

        self.check_page_break(lh)?;
        self.sink.set_font(style, size);
        let y = self.baseline(size);
        self.sink
            .draw_text(&pair.left, layout.margin, y, TextAlign::Left)?;
        self.sink.draw_text(
            &pair.right,
            layout.page_width - layout.margin,
            y,
            TextAlign::Right,
        )?;
        self.cursor.y += lh;
        Ok(())
    }

    fn draw_bullets(&mut self, bullets: &[String]) -> Result<(), RenderError> {
        let layout = self.layout;
        let size = layout.body_size;
        let lh = layout.line_height(size);
        let width = layout.content_width() - layout.bullet_indent;

        for bullet in bullets {
            self.sink.set_font(FontStyle::Regular, size);
            let lines = self.sink.split_text_to_size(bullet, width);
            for (i, line) in lines.iter().enumerate() {
                self.check_page_break(lh)?;
                self.sink.set_font(FontStyle::Regular, size);
                let y = self.baseline(size);
                if i == 0 {
                    self.sink.draw_text(
                        BULLET_GLYPH,
                        layout.margin + layout.bullet_offset,
                        y,
                        TextAlign::Left,
                    )?;
                }
                self.sink
                    .draw_text(line, layout.margin + layout.bullet_indent, y, TextAlign::Left)?;
                self.cursor.y += lh;
            }
        }
        Ok(())
    }
}

/// `Jane Doe` → `Jane_Doe.pdf`; a blank name falls back to `resume.pdf`.
pub fn artifact_file_name(full_name: &str) -> String {
    let stem: String = full_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | '\\' | '/' | ';'))
        .collect();
    if stem.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{stem}.pdf")
    }
}

/// Generates the downloadable PDF for `data` with sections in `order`.
///
/// All-or-nothing: the first sink error aborts generation and is returned.
pub fn render_pdf(
    data: &ResumeData,
    order: &[SectionId],
    layout: &PdfLayout,
) -> Result<PdfArtifact, RenderError> {
    let header = build_header(data);
    let sections = build_sections_content(order, data);
    let file_name = artifact_file_name(&data.contact.full_name);
    let title = if header.name.is_empty() {
        "Resume"
    } else {
        header.name.as_str()
    };

    let sink = PrintPdfSink::new(title, layout.page_width, layout.page_height)?;
    let sink = PdfCompositor::new(sink, layout).compose(&header, &sections)?;
    info!(
        file_name = file_name.as_str(),
        pages = sink.page_count(),
        "PDF generated"
    );
    sink.save(&file_name)
}
