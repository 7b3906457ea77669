//! LLM invocation log model and DTO.

use draftdeck_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Audit row recording one LLM invocation (mock or real).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LlmLog {
    pub id: DbId,
    pub project_id: Option<DbId>,
    pub section_id: Option<DbId>,
    pub provider: Option<String>,
    pub prompt: Option<String>,
    pub output: Option<String>,
    pub tokens: Option<i32>,
    pub cost_estimate: Option<f64>,
    pub created_at: Timestamp,
}

/// DTO for recording an LLM invocation.
#[derive(Debug, Clone)]
pub struct CreateLlmLog {
    pub project_id: Option<DbId>,
    pub section_id: Option<DbId>,
    pub provider: String,
    pub prompt: String,
    pub output: String,
}
