//! Handlers for section mutation: generate, refine, feedback, comment,
//! save, reorder.
//!
//! Every operation verifies project ownership first, then section
//! membership; a section in someone else's project is a 404.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use draftdeck_core::error::CoreError;
use draftdeck_core::types::DbId;
use draftdeck_db::models::comment::Comment;
use draftdeck_db::models::llm_log::CreateLlmLog;
use draftdeck_db::models::section::{CreateSection, Section, UpdateSection};
use draftdeck_db::repositories::{CommentRepo, LlmLogRepo, ProjectRepo, RevisionRepo, SectionRepo};
use draftdeck_llm::GenerateParams;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{project_doc_type, project_for_owner};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/projects/{id}/generate`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub section_id: Option<DbId>,
    pub slide_index: Option<i32>,
    pub template: Option<String>,
}

/// Response for generate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub text: String,
    pub generation_id: String,
    pub meta: Value,
}

/// One entry of the generate_all response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAllEntry {
    pub section_id: DbId,
    pub text: String,
    pub generation_id: String,
}

/// Response for `POST /api/projects/{id}/generate_all`.
#[derive(Debug, Serialize)]
pub struct GenerateAllResponse {
    pub results: Vec<GenerateAllEntry>,
}

/// Request body for `POST /api/projects/{id}/refine`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    pub section_id: DbId,
    pub prompt: String,
}

/// Response for refine.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineResponse {
    pub text: String,
    pub revision_id: DbId,
}

/// Request body for `POST /api/projects/{id}/feedback`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub section_id: DbId,
    pub like: bool,
}

/// Request body for `POST /api/projects/{id}/comment`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub section_id: DbId,
    pub comment: String,
}

/// Request body for `PUT /api/projects/{id}/sections/reorder`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub section_ids: Vec<DbId>,
}

/// Response for `POST /api/projects/{id}/feedback`.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

// ---------------------------------------------------------------------------
// Shared lookups
// ---------------------------------------------------------------------------

async fn section_in_project(
    state: &AppState,
    section_id: DbId,
    project_id: DbId,
) -> AppResult<Section> {
    SectionRepo::find_in_project(&state.pool, section_id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Section",
            id: section_id,
        }))
}

/// Persist the generated text: revision + section content + audit log.
async fn record_generation(
    state: &AppState,
    project_id: DbId,
    section_id: DbId,
    text: &str,
    prompt: &str,
) -> AppResult<()> {
    RevisionRepo::create(&state.pool, section_id, text, Some(prompt)).await?;
    SectionRepo::update_content(&state.pool, section_id, text).await?;
    LlmLogRepo::create(
        &state.pool,
        &CreateLlmLog {
            project_id: Some(project_id),
            section_id: Some(section_id),
            provider: state.llm.provider().as_str().to_string(),
            prompt: prompt.to_string(),
            output: text.to_string(),
        },
    )
    .await?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/projects/{id}/generate
///
/// Generate content for a section (or a fresh "Generated Section" when no
/// sectionId is given), append a revision, and log the invocation.
pub async fn generate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<Json<GenerateResponse>> {
    let project = project_for_owner(&state, project_id, user.user_id).await?;
    let doc_type = project_doc_type(&project)?;

    let section = match input.section_id {
        Some(section_id) => Some(section_in_project(&state, section_id, project_id).await?),
        None => None,
    };

    let context = section
        .as_ref()
        .map(|s| s.content.clone())
        .filter(|c| !c.is_empty());

    let generation = state
        .llm
        .generate(
            &GenerateParams {
                project_id,
                section_id: input.section_id,
                slide_index: input.slide_index,
                context,
                template: input.template.clone(),
            },
            doc_type,
        )
        .await?;

    let prompt = serde_json::to_string(&input).unwrap_or_default();
    let target_id = match section {
        Some(section) => section.id,
        None => {
            let order_index = SectionRepo::next_order_index(&state.pool, project_id).await?;
            let created = SectionRepo::create(
                &state.pool,
                &CreateSection {
                    project_id,
                    title: "Generated Section".to_string(),
                    content: generation.text.clone(),
                    draft: false,
                    order_index,
                },
            )
            .await?;
            created.id
        }
    };
    record_generation(&state, project_id, target_id, &generation.text, &prompt).await?;

    Ok(Json(GenerateResponse {
        text: generation.text,
        generation_id: generation.generation_id,
        meta: generation.meta,
    }))
}

/// POST /api/projects/{id}/generate_all
///
/// Generate content for every section, in order. Fails on the first
/// provider error (all-or-nothing per request, no partial retries).
pub async fn generate_all(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<GenerateAllResponse>> {
    let project = project_for_owner(&state, project_id, user.user_id).await?;
    let doc_type = project_doc_type(&project)?;
    let sections = SectionRepo::list_by_project(&state.pool, project_id).await?;

    let mut results = Vec::with_capacity(sections.len());
    for section in sections {
        let context = Some(section.content.clone()).filter(|c| !c.is_empty());
        let generation = state
            .llm
            .generate(
                &GenerateParams {
                    project_id,
                    section_id: Some(section.id),
                    slide_index: None,
                    context,
                    template: None,
                },
                doc_type,
            )
            .await?;

        let prompt = format!("generate_all for section {}", section.id);
        record_generation(&state, project_id, section.id, &generation.text, &prompt).await?;

        results.push(GenerateAllEntry {
            section_id: section.id,
            text: generation.text,
            generation_id: generation.generation_id,
        });
    }

    Ok(Json(GenerateAllResponse { results }))
}

/// POST /api/projects/{id}/refine
///
/// Re-invoke the LLM with the section's current content plus a prompt.
/// Appends exactly one revision; history only grows.
pub async fn refine(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<RefineRequest>,
) -> AppResult<Json<RefineResponse>> {
    let _project = project_for_owner(&state, project_id, user.user_id).await?;
    let section = section_in_project(&state, input.section_id, project_id).await?;

    let refined = state.llm.refine(&section.content, &input.prompt).await?;

    let revision =
        RevisionRepo::create(&state.pool, section.id, &refined, Some(&input.prompt)).await?;
    SectionRepo::update_content(&state.pool, section.id, &refined).await?;
    LlmLogRepo::create(
        &state.pool,
        &CreateLlmLog {
            project_id: Some(project_id),
            section_id: Some(section.id),
            provider: state.llm.provider().as_str().to_string(),
            prompt: input.prompt.clone(),
            output: refined.clone(),
        },
    )
    .await?;
    ProjectRepo::touch(&state.pool, project_id).await?;

    Ok(Json(RefineResponse {
        text: refined,
        revision_id: revision.id,
    }))
}

/// POST /api/projects/{id}/feedback
///
/// Set the section's like/dislike flag.
pub async fn feedback(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<FeedbackRequest>,
) -> AppResult<Json<OkResponse>> {
    let _project = project_for_owner(&state, project_id, user.user_id).await?;

    let updated =
        SectionRepo::set_liked(&state.pool, input.section_id, project_id, input.like).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Section",
            id: input.section_id,
        }));
    }

    LlmLogRepo::create(
        &state.pool,
        &CreateLlmLog {
            project_id: Some(project_id),
            section_id: Some(input.section_id),
            provider: state.llm.provider().as_str().to_string(),
            prompt: format!("feedback: {}", input.like),
            output: String::new(),
        },
    )
    .await?;

    Ok(Json(OkResponse { ok: true }))
}

/// POST /api/projects/{id}/comment
pub async fn comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CommentRequest>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    let _project = project_for_owner(&state, project_id, user.user_id).await?;
    let section = section_in_project(&state, input.section_id, project_id).await?;

    let comment =
        CommentRepo::create(&state.pool, section.id, Some(user.user_id), &input.comment).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// PUT /api/projects/{id}/sections/{section_id}
///
/// Client "save": update a section's title and/or content.
pub async fn save_section(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, section_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateSection>,
) -> AppResult<Json<Section>> {
    let _project = project_for_owner(&state, project_id, user.user_id).await?;

    let section = SectionRepo::save(&state.pool, section_id, project_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Section",
            id: section_id,
        }))?;
    ProjectRepo::touch(&state.pool, project_id).await?;

    Ok(Json(section))
}

/// PUT /api/projects/{id}/sections/reorder
///
/// Rewrite order indices to the given id sequence. The id set must match
/// the project's sections exactly; indices come out dense (0..n-1).
pub async fn reorder_sections(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<Vec<Section>>> {
    let _project = project_for_owner(&state, project_id, user.user_id).await?;
    let sections = SectionRepo::list_by_project(&state.pool, project_id).await?;

    let mut expected: Vec<DbId> = sections.iter().map(|s| s.id).collect();
    let mut given = input.section_ids.clone();
    expected.sort_unstable();
    given.sort_unstable();
    if expected != given {
        return Err(AppError::Core(CoreError::Validation(
            "sectionIds must contain each section of the project exactly once".into(),
        )));
    }

    SectionRepo::reorder(&state.pool, project_id, &input.section_ids).await?;
    ProjectRepo::touch(&state.pool, project_id).await?;

    let reordered = SectionRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(reordered))
}
