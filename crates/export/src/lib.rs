//! Binary document renderers: deck model -> PPTX, sections -> DOCX.
//!
//! Both formats are OOXML packages: a zip archive of XML parts. The
//! renderers assemble the minimal part set a conforming reader needs.
//! Styling (fonts, colors) is embedded best-effort; substitution on the
//! viewing machine is a documented limitation, not a bug.

mod docx;
mod error;
mod pptx;
mod xml;

pub use docx::{render_docx, DocSection};
pub use error::ExportError;
pub use pptx::render_pptx;

/// MIME type for generated PPTX files.
pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// MIME type for generated DOCX files.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
