//! The drawing surface the PDF compositor writes to.

use thiserror::Error;

use crate::layout::font_metrics::{get_metrics, FontStyle};
use crate::layout::wrap::wrap_text;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("document sink error: {0}")]
    Sink(String),

    #[error("render task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Left edge of a run of `width` anchored at `x`.
    pub fn left_edge(&self, x: f32, width: f32) -> f32 {
        match self {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        }
    }
}

/// A finished, downloadable document.
#[derive(Debug, Clone)]
pub struct PdfArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Paginated drawing surface.
///
/// Coordinates are in points with the origin at the top-left corner of the current
/// page; `y` grows downwards and names the text baseline. Text measurement and
/// wrapping use the font set by the last `set_font` call.
pub trait DocumentSink {
    fn set_font(&mut self, style: FontStyle, size: f32);

    /// Current `(style, size)`.
    fn font(&self) -> (FontStyle, f32);

    fn text_width(&self, text: &str) -> f32 {
        let (style, size) = self.font();
        get_metrics(style).width(text, size)
    }

    fn split_text_to_size(&self, text: &str, max_width: f32) -> Vec<String> {
        let (style, size) = self.font();
        wrap_text(text, get_metrics(style), size, max_width)
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign) -> Result<(), RenderError>;

    fn draw_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
    ) -> Result<(), RenderError>;

    fn add_page(&mut self) -> Result<(), RenderError>;

    fn page_count(&self) -> usize;

    /// Serializes the document under `file_name`.
    fn save(self, file_name: &str) -> Result<PdfArtifact, RenderError>
    where
        Self: Sized;
}

/// In-memory sink that records every drawing call.
#[cfg(test)]
pub mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawOp {
        Text {
            page: usize,
            text: String,
            x: f32,
            y: f32,
            style: FontStyle,
            size: f32,
            align: TextAlign,
        },
        Line {
            page: usize,
            y: f32,
            thickness: f32,
        },
        NewPage,
    }

    pub struct RecordingSink {
        pub ops: Vec<DrawOp>,
        pages: usize,
        style: FontStyle,
        size: f32,
        /// Fail `add_page` once this many pages exist.
        pub max_pages: Option<usize>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            RecordingSink {
                ops: Vec::new(),
                pages: 1,
                style: FontStyle::Regular,
                size: 10.0,
                max_pages: None,
            }
        }

        pub fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Text { text, .. } => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn text_op(&self, needle: &str) -> Option<&DrawOp> {
            self.ops
                .iter()
                .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
        }
    }

    impl DocumentSink for RecordingSink {
        fn set_font(&mut self, style: FontStyle, size: f32) {
            self.style = style;
            self.size = size;
        }

        fn font(&self) -> (FontStyle, f32) {
            (self.style, self.size)
        }

        fn draw_text(
            &mut self,
            text: &str,
            x: f32,
            y: f32,
            align: TextAlign,
        ) -> Result<(), RenderError> {
            self.ops.push(DrawOp::Text {
                page: self.pages,
                text: text.to_string(),
                x,
                y,
                style: self.style,
                size: self.size,
                align,
            });
            Ok(())
        }

        fn draw_line(
            &mut self,
            _x1: f32,
            y1: f32,
            _x2: f32,
            _y2: f32,
            thickness: f32,
        ) -> Result<(), RenderError> {
            self.ops.push(DrawOp::Line {
                page: self.pages,
                y: y1,
                thickness,
            });
            Ok(())
        }

        fn add_page(&mut self) -> Result<(), RenderError> {
            if self.max_pages.is_some_and(|max| self.pages >= max) {
                return Err(RenderError::Sink("page limit reached".to_string()));
            }
            self.pages += 1;
            self.ops.push(DrawOp::NewPage);
            Ok(())
        }

        fn page_count(&self) -> usize {
            self.pages
        }

        fn save(self, file_name: &str) -> Result<PdfArtifact, RenderError> {
            Ok(PdfArtifact {
                file_name: file_name.to_string(),
                bytes: Vec::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_left_edges() {
        assert_eq!(TextAlign::Left.left_edge(100.0, 40.0), 100.0);
        assert_eq!(TextAlign::Center.left_edge(100.0, 40.0), 80.0);
        assert_eq!(TextAlign::Right.left_edge(100.0, 40.0), 60.0);
    }

    #[test]
    fn test_default_measurement_uses_current_font() {
        let mut sink = recording::RecordingSink::new();
        sink.set_font(FontStyle::Regular, 12.0);
        let regular = sink.text_width("Experience");
        sink.set_font(FontStyle::Bold, 12.0);
        let bold = sink.text_width("Experience");
        assert!(bold > regular);
    }
}
