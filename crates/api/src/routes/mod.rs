//! Route tree construction.

pub mod auth;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                         signup (public)
/// /auth/login                          login (public)
/// /auth/me                             me (requires auth)
///
/// /projects                            list, create
/// /projects/suggest_outline            outline for the creation wizard
/// /projects/suggest_templates          built-in template descriptors
/// /projects/generate_pptx              deck JSON -> PPTX download
/// /projects/{id}                       get, delete
/// /projects/{id}/files                 flat project dump
/// /projects/{id}/generate              generate section content
/// /projects/{id}/generate_all          generate every section
/// /projects/{id}/refine                refine a section
/// /projects/{id}/feedback              like/dislike a section
/// /projects/{id}/comment               comment on a section
/// /projects/{id}/export                sections -> PPTX/DOCX download
/// /projects/{id}/suggest_outline       outline for an existing project
/// /projects/{id}/sections/reorder      rewrite section order
/// /projects/{id}/sections/{section_id} save title/content
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
}
