//! Repository for the `llm_logs` table (append-only audit trail).

use draftdeck_core::types::DbId;
use sqlx::PgPool;

use crate::models::llm_log::{CreateLlmLog, LlmLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, section_id, provider, prompt, output, tokens, cost_estimate, created_at";

/// Records LLM invocations for audit/debugging.
pub struct LlmLogRepo;

impl LlmLogRepo {
    /// Record one LLM invocation.
    pub async fn create(pool: &PgPool, input: &CreateLlmLog) -> Result<LlmLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO llm_logs (project_id, section_id, provider, prompt, output)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LlmLog>(&query)
            .bind(input.project_id)
            .bind(input.section_id)
            .bind(&input.provider)
            .bind(&input.prompt)
            .bind(&input.output)
            .fetch_one(pool)
            .await
    }

    /// List a project's LLM invocations, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<LlmLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM llm_logs WHERE project_id = $1 ORDER BY id");
        sqlx::query_as::<_, LlmLog>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
