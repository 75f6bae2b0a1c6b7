//! Paper formats and the per-format page configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::measure::ScreenStyle;
use crate::pdf::PdfLayout;

/// CSS reference pixels per PDF point (96 dpi / 72 dpi).
pub const PX_PER_PT: f32 = 96.0 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    Letter,
    A4,
}

impl PageFormat {
    /// `(width, height)` in PDF points.
    pub fn size_pt(&self) -> (f32, f32) {
        match self {
            PageFormat::Letter => (612.0, 792.0),
            PageFormat::A4 => (595.28, 841.89),
        }
    }

    /// `(width, height)` in CSS pixels.
    pub fn size_px(&self) -> (f32, f32) {
        let (w, h) = self.size_pt();
        (w * PX_PER_PT, h * PX_PER_PT)
    }
}

impl FromStr for PageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" | "us-letter" => Ok(PageFormat::Letter),
            "a4" => Ok(PageFormat::A4),
            other => Err(format!("unknown page format '{other}' (expected letter or a4)")),
        }
    }
}

/// Layout parameters for both output surfaces at one paper format.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub format: PageFormat,
    pub screen: ScreenStyle,
    pub pdf: PdfLayout,
}

/// Returns the default page config for the given paper format.
pub fn default_page_config(format: PageFormat) -> PageConfig {
    PageConfig {
        format,
        screen: ScreenStyle::for_format(format),
        pdf: PdfLayout::for_format(format),
    }
}
