//! Route definitions for the `/projects` resource.
//!
//! Static segments (`suggest_outline`, `generate_pptx`, `sections/reorder`)
//! are declared alongside captures; the router gives them priority.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{export, project, section, suggest};
use crate::state::AppState;

/// Routes mounted at `/projects`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/suggest_outline", post(suggest::suggest_outline))
        .route("/suggest_templates", post(suggest::suggest_templates))
        .route("/generate_pptx", post(export::generate_pptx))
        .route("/{id}", get(project::get_by_id).delete(project::delete))
        .route("/{id}/files", get(project::files))
        .route("/{id}/generate", post(section::generate))
        .route("/{id}/generate_all", post(section::generate_all))
        .route("/{id}/refine", post(section::refine))
        .route("/{id}/feedback", post(section::feedback))
        .route("/{id}/comment", post(section::comment))
        .route("/{id}/export", post(export::export))
        .route(
            "/{id}/suggest_outline",
            post(suggest::suggest_outline_for_project),
        )
        .route("/{id}/sections/reorder", put(section::reorder_sections))
        .route("/{id}/sections/{section_id}", put(section::save_section))
}
