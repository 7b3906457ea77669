//! Section entity model and DTOs.

use draftdeck_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A section row from the `sections` table.
///
/// `order_index` is dense (0..n-1) within a project; the repository's
/// reorder operation maintains that invariant. `liked` is the tri-state
/// feedback flag: unset, liked, or disliked.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Section {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub content: String,
    pub draft: bool,
    pub order_index: i32,
    pub liked: Option<bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new section.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSection {
    pub project_id: DbId,
    pub title: String,
    pub content: String,
    pub draft: bool,
    pub order_index: i32,
}

/// DTO for the client "save" operation. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSection {
    pub title: Option<String>,
    pub content: Option<String>,
}
