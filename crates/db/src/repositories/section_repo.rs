//! Repository for the `sections` table.

use draftdeck_core::types::DbId;
use sqlx::PgPool;

use crate::models::section::{CreateSection, Section, UpdateSection};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, title, content, draft, order_index, liked, created_at, updated_at";

/// Provides CRUD operations for sections.
pub struct SectionRepo;

impl SectionRepo {
    /// Insert a new section, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSection) -> Result<Section, sqlx::Error> {
        let query = format!(
            "INSERT INTO sections (project_id, title, content, draft, order_index)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.draft)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    /// List a project's sections in display order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Section>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sections WHERE project_id = $1 ORDER BY order_index, id"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Find a section by ID, scoped to a project. Returns `None` when the
    /// section does not exist or belongs to a different project.
    pub async fn find_in_project(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// The next dense order index for a project (current section count).
    pub async fn next_order_index(pool: &PgPool, project_id: DbId) -> Result<i32, sqlx::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sections WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(pool)
                .await?;
        Ok(count as i32)
    }

    /// Apply the client "save" operation. Only non-`None` fields change.
    /// Returns `None` if no row matched.
    pub async fn save(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
        input: &UpdateSection,
    ) -> Result<Option<Section>, sqlx::Error> {
        let query = format!(
            "UPDATE sections SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Replace a section's content (post-generation/refinement). Marks the
    /// section as no longer a draft.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Section>, sqlx::Error> {
        let query = format!(
            "UPDATE sections SET content = $2, draft = FALSE, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Set the like/dislike flag. Returns `true` if a row was updated.
    pub async fn set_liked(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
        liked: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sections SET liked = $3, updated_at = NOW()
             WHERE id = $1 AND project_id = $2",
        )
        .bind(id)
        .bind(project_id)
        .bind(liked)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Rewrite a project's order indices to match `ordered_ids` (position in
    /// the slice becomes the index), restoring the dense 0..n-1 invariant.
    ///
    /// The caller is responsible for validating that `ordered_ids` is
    /// exactly the project's section id set. Runs in one transaction.
    pub async fn reorder(
        pool: &PgPool,
        project_id: DbId,
        ordered_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for (index, section_id) in ordered_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE sections SET order_index = $3, updated_at = NOW()
                 WHERE id = $1 AND project_id = $2",
            )
            .bind(section_id)
            .bind(project_id)
            .bind(index as i32)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }
}
