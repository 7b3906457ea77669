//! Comment entity model.

use draftdeck_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A comment on a section. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub section_id: DbId,
    /// Nulled if the authoring user is deleted.
    pub author_id: Option<DbId>,
    pub text: String,
    pub created_at: Timestamp,
}
