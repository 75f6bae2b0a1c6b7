// Screen layout: font metrics, text wrapping, off-screen measurement, greedy pagination
// of measured sections into preview pages, and the HTML preview renderer.
// Layout passes are synchronous and cheap; handlers call them directly.

pub mod font_metrics;
pub mod html;
pub mod measure;
pub mod page;
pub mod paginator;
pub mod wrap;

// Re-export the public API consumed by other modules (pdf, session handlers).
pub use page::{default_page_config, PageConfig, PageFormat};
pub use paginator::{build_preview, ScreenPreview};
