//! Project entity model and DTOs.

use draftdeck_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::section::Section;

/// A project row from the `projects` table.
///
/// `doc_type` is constrained to `"docx"` / `"pptx"` by a CHECK constraint;
/// parse into [`draftdeck_core::types::DocType`] where typed behavior is
/// needed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    #[serde(rename = "docType")]
    pub doc_type: String,
    pub topic: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub owner_id: DbId,
    pub title: String,
    pub doc_type: String,
    pub topic: Option<String>,
}

/// A project together with its ordered sections, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithSections {
    #[serde(flatten)]
    pub project: Project,
    pub sections: Vec<Section>,
}
