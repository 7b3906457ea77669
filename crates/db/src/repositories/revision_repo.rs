//! Repository for the `revisions` table (append-only).

use draftdeck_core::types::DbId;
use sqlx::PgPool;

use crate::models::revision::Revision;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, section_id, text, prompt, created_at";

/// Provides append/read operations for revisions. There is deliberately no
/// update or single-row delete: history only grows.
pub struct RevisionRepo;

impl RevisionRepo {
    /// Append a revision snapshot to a section.
    pub async fn create(
        pool: &PgPool,
        section_id: DbId,
        text: &str,
        prompt: Option<&str>,
    ) -> Result<Revision, sqlx::Error> {
        let query = format!(
            "INSERT INTO revisions (section_id, text, prompt)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(section_id)
            .bind(text)
            .bind(prompt)
            .fetch_one(pool)
            .await
    }

    /// List a section's revisions, oldest first.
    pub async fn list_by_section(
        pool: &PgPool,
        section_id: DbId,
    ) -> Result<Vec<Revision>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM revisions WHERE section_id = $1 ORDER BY id");
        sqlx::query_as::<_, Revision>(&query)
            .bind(section_id)
            .fetch_all(pool)
            .await
    }

    /// List every revision across a project's sections, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Revision>, sqlx::Error> {
        let query = "SELECT r.id, r.section_id, r.text, r.prompt, r.created_at
             FROM revisions r
             JOIN sections s ON s.id = r.section_id
             WHERE s.project_id = $1
             ORDER BY r.id";
        sqlx::query_as::<_, Revision>(query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
