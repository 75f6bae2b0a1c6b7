// Section Model Builder: which resume sections exist, in what order, and what each one says.
// Both renderers (screen preview, PDF) consume the content tree built here and nothing else.

pub mod content;
pub mod model;
pub mod reorder;

pub use content::{build_header, build_sections_content};
pub use model::{build_sections, requested_order, sync_order, Section, SectionId};
pub use reorder::{reorder, ReorderError};
