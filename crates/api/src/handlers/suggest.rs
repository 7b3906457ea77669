//! Handlers for LLM-backed suggestions (outline titles, templates).
//!
//! Purely advisory: nothing here persists.

use axum::extract::{Path, State};
use axum::Json;
use draftdeck_core::deck::{builtin_templates, TemplateSpec};
use draftdeck_core::types::{DbId, DocType};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::project::{project_doc_type, project_for_owner};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/projects/{id}/suggest_outline`.
#[derive(Debug, Deserialize)]
pub struct OutlineRequest {
    pub topic: String,
    pub template: Option<String>,
}

/// Request body for `POST /api/projects/suggest_outline` (no project yet,
/// used by the creation wizard).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineSuggestRequest {
    pub topic: String,
    pub doc_type: String,
    pub template: Option<String>,
}

/// Response for both outline endpoints.
#[derive(Debug, Serialize)]
pub struct OutlineResponse {
    pub titles: Vec<String>,
}

/// Request body for `POST /api/projects/suggest_templates`.
#[derive(Debug, Deserialize)]
pub struct TemplatesRequest {
    pub topic: Option<String>,
}

/// Response for `POST /api/projects/suggest_templates`.
#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<TemplateSpec>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/projects/{id}/suggest_outline
pub async fn suggest_outline_for_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<OutlineRequest>,
) -> AppResult<Json<OutlineResponse>> {
    let project = project_for_owner(&state, project_id, user.user_id).await?;
    let doc_type = project_doc_type(&project)?;

    let titles = state
        .llm
        .suggest_outline(&input.topic, doc_type, input.template.as_deref())
        .await?;
    Ok(Json(OutlineResponse { titles }))
}

/// POST /api/projects/suggest_outline
pub async fn suggest_outline(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<OutlineSuggestRequest>,
) -> AppResult<Json<OutlineResponse>> {
    let doc_type: DocType = input.doc_type.parse().map_err(AppError::Core)?;

    let titles = state
        .llm
        .suggest_outline(&input.topic, doc_type, input.template.as_deref())
        .await?;
    Ok(Json(OutlineResponse { titles }))
}

/// POST /api/projects/suggest_templates
///
/// The built-in template descriptors. The topic is accepted for future
/// provider-backed ranking but not used today.
pub async fn suggest_templates(
    State(_state): State<AppState>,
    _user: AuthUser,
    Json(_input): Json<TemplatesRequest>,
) -> AppResult<Json<TemplatesResponse>> {
    Ok(Json(TemplatesResponse {
        templates: builtin_templates(),
    }))
}
