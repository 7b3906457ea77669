//! Project sections -> DOCX package.
//!
//! Emits the minimal WordprocessingML part set: content types, package
//! relationships, and the document part. Each section becomes a heading
//! followed by its paragraphs; comments are optionally appended inline.

use std::io::{Cursor, Write};

use draftdeck_core::deck::split_paragraphs;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::ExportError;
use crate::xml::xml_escape;

// Run sizes in half-points.
const TITLE_SIZE: u32 = 48;
const HEADING_SIZE: u32 = 32;
const BODY_SIZE: u32 = 22;

/// Input section for the DOCX renderer.
#[derive(Debug, Clone)]
pub struct DocSection {
    pub title: String,
    pub content: String,
    /// Comment texts appended when `include_comments` is set.
    pub comments: Vec<String>,
}

/// Render a document into DOCX bytes.
pub fn render_docx(
    title: &str,
    sections: &[DocSection],
    include_comments: bool,
) -> Result<Vec<u8>, ExportError> {
    tracing::info!(title = %title, sections = sections.len(), "rendering docx");

    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    archive.start_file("[Content_Types].xml", options)?;
    archive.write_all(content_types().as_bytes())?;

    archive.start_file("_rels/.rels", options)?;
    archive.write_all(package_rels().as_bytes())?;

    archive.start_file("word/document.xml", options)?;
    archive.write_all(document(title, sections, include_comments).as_bytes())?;

    let cursor = archive.finish()?;
    Ok(cursor.into_inner())
}

fn content_types() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
     <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
     <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
     <Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
     </Types>"
        .to_string()
}

fn package_rels() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\
     </Relationships>"
        .to_string()
}

/// One paragraph with explicit size, weight, and italics.
fn paragraph(text: &str, size: u32, bold: bool, italic: bool) -> String {
    let mut props = format!("<w:sz w:val=\"{size}\"/>");
    if bold {
        props.push_str("<w:b/>");
    }
    if italic {
        props.push_str("<w:i/>");
    }
    format!(
        "<w:p><w:r><w:rPr>{props}</w:rPr>\
         <w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        xml_escape(text)
    )
}

fn document(title: &str, sections: &[DocSection], include_comments: bool) -> String {
    let mut body = paragraph(title, TITLE_SIZE, true, false);

    for section in sections {
        body.push_str(&paragraph(&section.title, HEADING_SIZE, true, false));
        for text in split_paragraphs(&section.content) {
            body.push_str(&paragraph(&text, BODY_SIZE, false, false));
        }
        if include_comments {
            for comment in &section.comments {
                body.push_str(&paragraph(&format!("Comment: {comment}"), BODY_SIZE, false, true));
            }
        }
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}\
         <w:sectPr><w:pgSz w:w=\"11906\" w:h=\"16838\"/>\
         <w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\"/></w:sectPr>\
         </w:body></w:document>"
    )
}
