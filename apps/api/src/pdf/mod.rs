// PDF Compositor: cursor-driven composition of the resume onto a paginated document.
// Composition is CPU-bound and printpdf documents are not Send, so callers build and
// save the document inside one tokio::task::spawn_blocking closure.

pub mod compositor;
pub mod printpdf_sink;
pub mod sink;

pub use compositor::{render_pdf, PdfLayout};
pub use sink::{PdfArtifact, RenderError};
