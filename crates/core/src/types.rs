use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The kind of document a project produces.
///
/// Stored in the `projects.doc_type` column as `"docx"` / `"pptx"` and
/// carried verbatim on the wire (`docType` in request/response JSON).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    /// A report-style word document.
    Docx,
    /// A slide presentation.
    Pptx,
}

impl DocType {
    /// The wire/database string for this document type.
    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Docx => "docx",
            DocType::Pptx => "pptx",
        }
    }

    /// Human-readable label used as the title-slide subtitle.
    pub fn label(self) -> &'static str {
        match self {
            DocType::Docx => "Document",
            DocType::Pptx => "Presentation",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docx" => Ok(DocType::Docx),
            "pptx" => Ok(DocType::Pptx),
            other => Err(crate::error::CoreError::Validation(format!(
                "docType must be 'docx' or 'pptx', got '{other}'"
            ))),
        }
    }
}
