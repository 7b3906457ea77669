//! Handlers for the `/projects` resource (CRUD + files dump).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use draftdeck_core::error::CoreError;
use draftdeck_core::types::{DbId, DocType};
use draftdeck_db::models::project::{CreateProject, Project, ProjectWithSections};
use draftdeck_db::models::section::CreateSection;
use draftdeck_db::repositories::{
    CommentRepo, LlmLogRepo, ProjectRepo, RevisionRepo, SectionRepo,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/projects`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 256, message = "title is required"))]
    pub title: String,
    pub doc_type: String,
    pub topic: Option<String>,
    /// Seed content: when present, becomes an "Introduction" section.
    pub scaffold: Option<String>,
}

/// Response for `DELETE /api/projects/{id}`.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

// ---------------------------------------------------------------------------
// Shared lookups
// ---------------------------------------------------------------------------

/// Load a project owned by the caller, or fail with 404.
pub async fn project_for_owner(
    state: &AppState,
    project_id: DbId,
    owner_id: DbId,
) -> AppResult<Project> {
    ProjectRepo::find_for_owner(&state.pool, project_id, owner_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
}

/// Parse a project row's stored doc_type. The column is CHECK-constrained,
/// so failure here means corrupted data.
pub fn project_doc_type(project: &Project) -> AppResult<DocType> {
    project.doc_type.parse::<DocType>().map_err(|_| {
        AppError::Core(CoreError::Internal(format!(
            "invalid stored doc_type for project {}",
            project.id
        )))
    })
}

async fn with_sections(state: &AppState, project: Project) -> AppResult<ProjectWithSections> {
    let sections = SectionRepo::list_by_project(&state.pool, project.id).await?;
    Ok(ProjectWithSections { project, sections })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<ProjectWithSections>>> {
    let projects = ProjectRepo::list_by_owner(&state.pool, user.user_id).await?;

    let mut out = Vec::with_capacity(projects.len());
    for project in projects {
        out.push(with_sections(&state, project).await?);
    }
    Ok(Json(out))
}

/// POST /api/projects
///
/// Create a project. With a `scaffold`, one seeded section is created; with
/// only a `topic`, the LLM suggests an outline and placeholder sections are
/// created at dense order indices. Outline failures are advisory and do not
/// fail creation.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<ProjectWithSections>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    let doc_type: DocType = input
        .doc_type
        .parse()
        .map_err(AppError::Core)?;

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            owner_id: user.user_id,
            title: input.title,
            doc_type: doc_type.as_str().to_string(),
            topic: input.topic.clone(),
        },
    )
    .await?;

    if let Some(scaffold) = input.scaffold {
        SectionRepo::create(
            &state.pool,
            &CreateSection {
                project_id: project.id,
                title: "Introduction".to_string(),
                content: scaffold,
                draft: false,
                order_index: 0,
            },
        )
        .await?;
    } else if let Some(topic) = &input.topic {
        match state.llm.suggest_outline(topic, doc_type, None).await {
            Ok(titles) => {
                for (index, title) in titles.into_iter().enumerate() {
                    SectionRepo::create(
                        &state.pool,
                        &CreateSection {
                            project_id: project.id,
                            title,
                            content: String::new(),
                            draft: true,
                            order_index: index as i32,
                        },
                    )
                    .await?;
                }
            }
            Err(err) => {
                // The outline is advisory; the project is still usable.
                tracing::warn!(error = %err, project_id = project.id, "outline suggestion failed");
            }
        }
    }

    let response = with_sections(&state, project).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectWithSections>> {
    let project = project_for_owner(&state, id, user.user_id).await?;
    Ok(Json(with_sections(&state, project).await?))
}

/// DELETE /api/projects/{id}
///
/// Cascades to sections, revisions, and comments.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<OkResponse>> {
    let deleted = ProjectRepo::delete_for_owner(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    Ok(Json(OkResponse { ok: true }))
}

/// GET /api/projects/{id}/files
///
/// Flat dump of everything attached to a project.
pub async fn files(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let project = project_for_owner(&state, id, user.user_id).await?;
    let sections = SectionRepo::list_by_project(&state.pool, project.id).await?;
    let revisions = RevisionRepo::list_by_project(&state.pool, project.id).await?;
    let comments = CommentRepo::list_by_project(&state.pool, project.id).await?;
    let llm_logs = LlmLogRepo::list_by_project(&state.pool, project.id).await?;

    Ok(Json(json!({
        "project": project,
        "sections": sections,
        "revisions": revisions,
        "comments": comments,
        "llm_logs": llm_logs,
    })))
}
