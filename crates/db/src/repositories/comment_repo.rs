//! Repository for the `comments` table (append-only).

use draftdeck_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::Comment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, section_id, author_id, text, created_at";

/// Provides append/read operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Append a comment to a section.
    pub async fn create(
        pool: &PgPool,
        section_id: DbId,
        author_id: Option<DbId>,
        text: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (section_id, author_id, text)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(section_id)
            .bind(author_id)
            .bind(text)
            .fetch_one(pool)
            .await
    }

    /// List a section's comments, oldest first.
    pub async fn list_by_section(
        pool: &PgPool,
        section_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE section_id = $1 ORDER BY id");
        sqlx::query_as::<_, Comment>(&query)
            .bind(section_id)
            .fetch_all(pool)
            .await
    }

    /// List every comment across a project's sections, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = "SELECT c.id, c.section_id, c.author_id, c.text, c.created_at
             FROM comments c
             JOIN sections s ON s.id = c.section_id
             WHERE s.project_id = $1
             ORDER BY c.id";
        sqlx::query_as::<_, Comment>(query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
