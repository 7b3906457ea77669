//! Handlers for export: project -> PPTX/DOCX download, and direct
//! deck -> PPTX rendering.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use draftdeck_core::deck::{build_deck_model, default_template, DeckModel, SectionContent};
use draftdeck_core::error::CoreError;
use draftdeck_core::types::DbId;
use draftdeck_db::repositories::{CommentRepo, SectionRepo};
use draftdeck_export::{render_docx, render_pptx, DocSection, DOCX_CONTENT_TYPE, PPTX_CONTENT_TYPE};
use regex::Regex;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{project_doc_type, project_for_owner};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Client-supplied section override used by the export endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSection {
    pub id: Option<DbId>,
    pub title: String,
    pub content: Option<String>,
}

/// Request body for `POST /api/projects/{id}/export`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// `"pptx"` or `"docx"`.
    pub format: String,
    /// Restrict the export to these section ids.
    pub sections: Option<Vec<DbId>>,
    #[serde(default)]
    pub include_comments: bool,
    /// When present, these replace the stored sections entirely.
    pub client_sections: Option<Vec<ClientSection>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/projects/{id}/export
///
/// Render the project's sections as a downloadable binary. A project with
/// zero sections still exports: the deck then has only its title slide.
pub async fn export(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<ExportRequest>,
) -> AppResult<Response> {
    let project = project_for_owner(&state, project_id, user.user_id).await?;
    let doc_type = project_doc_type(&project)?;

    let mut sections = SectionRepo::list_by_project(&state.pool, project_id).await?;
    if let Some(wanted) = &input.sections {
        if !wanted.is_empty() {
            sections.retain(|s| wanted.contains(&s.id));
        }
    }

    match input.format.to_lowercase().as_str() {
        "pptx" => {
            let contents: Vec<SectionContent> = match &input.client_sections {
                Some(overrides) => overrides
                    .iter()
                    .map(|c| SectionContent {
                        title: c.title.clone(),
                        content: c.content.clone().unwrap_or_default(),
                    })
                    .collect(),
                None => sections
                    .iter()
                    .map(|s| SectionContent {
                        title: s.title.clone(),
                        content: s.content.clone(),
                    })
                    .collect(),
            };

            let deck = build_deck_model(
                &project.title,
                Some(&user.email),
                doc_type,
                &contents,
                default_template(),
            );
            let bytes = render_pptx(&deck)?;
            Ok(attachment(
                bytes,
                PPTX_CONTENT_TYPE,
                &format!("project-{project_id}.pptx"),
            ))
        }
        "docx" => {
            let mut doc_sections = Vec::with_capacity(sections.len());
            for section in &sections {
                let comments = if input.include_comments {
                    CommentRepo::list_by_section(&state.pool, section.id)
                        .await?
                        .into_iter()
                        .map(|c| c.text)
                        .collect()
                } else {
                    Vec::new()
                };
                doc_sections.push(DocSection {
                    title: section.title.clone(),
                    content: section.content.clone(),
                    comments,
                });
            }

            let bytes = render_docx(&project.title, &doc_sections, input.include_comments)?;
            Ok(attachment(
                bytes,
                DOCX_CONTENT_TYPE,
                &format!("project-{project_id}.docx"),
            ))
        }
        other => Err(AppError::Core(CoreError::Validation(format!(
            "format must be 'pptx' or 'docx', got '{other}'"
        )))),
    }
}

/// POST /api/projects/generate_pptx
///
/// Render a client-supplied deck model directly to PPTX.
pub async fn generate_pptx(
    State(_state): State<AppState>,
    _user: AuthUser,
    Json(deck): Json<DeckModel>,
) -> AppResult<Response> {
    let filename = format!("{}.pptx", safe_filename(&deck.title));
    let bytes = render_pptx(&deck)?;
    Ok(attachment(bytes, PPTX_CONTENT_TYPE, &filename))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a binary download response.
fn attachment(bytes: Vec<u8>, content_type: &str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Collapse anything outside `[0-9A-Za-z-_]` into underscores.
fn safe_filename(title: &str) -> String {
    let pattern = Regex::new(r"[^0-9A-Za-z\-_]+").expect("static regex");
    let cleaned = pattern.replace_all(title.trim(), "_").to_string();
    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        "presentation".to_string()
    } else {
        trimmed.to_string()
    }
}
