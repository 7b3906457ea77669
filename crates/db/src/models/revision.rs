//! Revision entity model.

use draftdeck_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An immutable snapshot of a section's content. Append-only: revisions are
/// never updated or deleted while their section exists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Revision {
    pub id: DbId,
    pub section_id: DbId,
    pub text: String,
    /// The prompt that produced this snapshot, when one exists.
    pub prompt: Option<String>,
    pub created_at: Timestamp,
}
