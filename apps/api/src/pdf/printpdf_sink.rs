//! `DocumentSink` backed by printpdf and the built-in Helvetica fonts.

use std::io::{BufWriter, Cursor};

use printpdf::*;

use crate::layout::font_metrics::FontStyle;
use crate::pdf::sink::{DocumentSink, PdfArtifact, RenderError, TextAlign};

const PT_TO_MM: f32 = 0.352_777_78;
const LAYER_NAME: &str = "Layer 1";

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
            FontStyle::BoldItalic => &self.bold_italic,
        }
    }
}

pub struct PrintPdfSink {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    page_width: f32,
    page_height: f32,
    pages: usize,
    style: FontStyle,
    size: f32,
}

impl PrintPdfSink {
    /// Opens a document with one empty page of `page_width` × `page_height` points.
    pub fn new(title: &str, page_width: f32, page_height: f32) -> Result<Self, RenderError> {
        let (doc, page1, layer1) = PdfDocument::new(
            title,
            Mm(page_width * PT_TO_MM),
            Mm(page_height * PT_TO_MM),
            LAYER_NAME,
        );

        let fonts = Fonts {
            regular: add_font(&doc, BuiltinFont::Helvetica)?,
            bold: add_font(&doc, BuiltinFont::HelveticaBold)?,
            italic: add_font(&doc, BuiltinFont::HelveticaOblique)?,
            bold_italic: add_font(&doc, BuiltinFont::HelveticaBoldOblique)?,
        };
        let layer = doc.get_page(page1).get_layer(layer1);

        Ok(PrintPdfSink {
            doc,
            layer,
            fonts,
            page_width,
            page_height,
            pages: 1,
            style: FontStyle::Regular,
            size: 10.0,
        })
    }

    /// Converts a top-left point coordinate to printpdf's bottom-left millimetres.
    fn point(&self, x: f32, y: f32) -> (Mm, Mm) {
        (Mm(x * PT_TO_MM), Mm((self.page_height - y) * PT_TO_MM))
    }
}

fn add_font(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef, RenderError> {
    doc.add_builtin_font(font)
        .map_err(|e| RenderError::Sink(format!("failed to load built-in font: {e:?}")))
}

impl DocumentSink for PrintPdfSink {
    fn set_font(&mut self, style: FontStyle, size: f32) {
        self.style = style;
        self.size = size;
    }

    fn font(&self) -> (FontStyle, f32) {
        (self.style, self.size)
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign) -> Result<(), RenderError> {
        if text.is_empty() {
            return Ok(());
        }
        let left = align.left_edge(x, self.text_width(text));
        let (mx, my) = self.point(left, y);
        self.layer
            .use_text(text, self.size, mx, my, self.fonts.get(self.style));
        Ok(())
    }

    fn draw_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
    ) -> Result<(), RenderError> {
        let (ax, ay) = self.point(x1, y1);
        let (bx, by) = self.point(x2, y2);
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points: vec![(Point::new(ax, ay), false), (Point::new(bx, by), false)],
            is_closed: false,
        });
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), RenderError> {
        let (page, layer) = self.doc.add_page(
            Mm(self.page_width * PT_TO_MM),
            Mm(self.page_height * PT_TO_MM),
            LAYER_NAME,
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.pages += 1;
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn save(self, file_name: &str) -> Result<PdfArtifact, RenderError> {
        let PrintPdfSink { doc, layer, .. } = self;
        drop(layer);

        let mut bytes = Vec::new();
        {
            let mut writer = BufWriter::new(Cursor::new(&mut bytes));
            doc.save(&mut writer)
                .map_err(|e| RenderError::Sink(format!("failed to serialize PDF: {e:?}")))?;
        }

        Ok(PdfArtifact {
            file_name: file_name.to_string(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_document_serializes() {
        let sink = PrintPdfSink::new("Test", 612.0, 792.0).unwrap();
        let artifact = sink.save("test.pdf").unwrap();
        assert_eq!(artifact.file_name, "test.pdf");
        assert!(artifact.bytes.starts_with(b"%PDF"), "output must be a PDF");
    }

    #[test]
    fn test_pages_are_counted() {
        let mut sink = PrintPdfSink::new("Test", 612.0, 792.0).unwrap();
        sink.set_font(FontStyle::Bold, 12.0);
        sink.draw_text("Hello", 306.0, 72.0, TextAlign::Center).unwrap();
        sink.draw_line(50.0, 80.0, 562.0, 80.0, 0.75).unwrap();
        sink.add_page().unwrap();
        sink.draw_text("Page two", 50.0, 72.0, TextAlign::Left).unwrap();
        assert_eq!(sink.page_count(), 2);
        let artifact = sink.save("two.pdf").unwrap();
        assert!(artifact.bytes.len() > 100);
    }

    #[test]
    fn test_point_flips_y_axis() {
        let sink = PrintPdfSink::new("Test", 612.0, 792.0).unwrap();
        let (x, y) = sink.point(0.0, 792.0);
        assert!(x.0.abs() < 1e-4);
        assert!(y.0.abs() < 1e-4, "bottom of the page is y=0 in PDF space");
    }
}
