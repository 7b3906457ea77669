//! HTTP-level integration tests for export endpoints and suggestions.

mod common;

use std::io::{Cursor, Read};

use axum::http::StatusCode;
use common::{body_bytes, body_json, post_json_auth};
use sqlx::PgPool;
use zip::ZipArchive;

fn part_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).expect("valid zip");
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).expect("valid zip");
    let mut part = archive.by_name(name).expect("part present");
    let mut content = String::new();
    part.read_to_string(&mut content).expect("utf-8 part");
    content
}

// ---------------------------------------------------------------------------
// Project export
// ---------------------------------------------------------------------------

/// A zero-section project still exports as a deck with exactly one (title)
/// slide.
#[sqlx::test(migrations = "../db/migrations")]
async fn export_empty_project_yields_single_title_slide(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool);

    let bare = body_json(
        post_json_auth(
            app.clone(),
            "/api/projects",
            &token,
            serde_json::json!({ "title": "Bare", "docType": "pptx" }),
        )
        .await,
    )
    .await;
    let bare_id = bare["id"].as_i64().unwrap();
    assert_eq!(bare["sections"].as_array().unwrap().len(), 0);

    let response = post_json_auth(
        app,
        &format!("/api/projects/{bare_id}/export"),
        &token,
        serde_json::json!({ "format": "pptx" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/vnd.openxmlformats-officedocument.presentationml.presentation"
    );
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains(&format!("project-{bare_id}.pptx")));

    let bytes = body_bytes(response).await;
    let names = part_names(&bytes);
    assert!(names.iter().any(|n| n == "ppt/slides/slide1.xml"));
    assert!(
        !names.iter().any(|n| n == "ppt/slides/slide2.xml"),
        "empty project must produce only the title slide"
    );
    let slide = read_part(&bytes, "ppt/slides/slide1.xml");
    assert!(slide.contains("Bare"));
}

/// PPTX export includes section slides with bulleted content.
#[sqlx::test(migrations = "../db/migrations")]
async fn export_pptx_includes_section_slides(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/projects",
            &token,
            serde_json::json!({
                "title": "Deck", "docType": "pptx",
                "scaffold": "First point.\n\nSecond point."
            }),
        )
        .await,
    )
    .await;
    let project_id = created["id"].as_i64().unwrap();

    let response = post_json_auth(
        app,
        &format!("/api/projects/{project_id}/export"),
        &token,
        serde_json::json!({ "format": "pptx" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body_bytes(response).await;
    let slide = read_part(&bytes, "ppt/slides/slide2.xml");
    assert!(slide.contains("Introduction"));
    assert!(slide.contains("First point."));
    assert!(slide.contains("Second point."));
}

/// Client-supplied sections replace stored ones in the export.
#[sqlx::test(migrations = "../db/migrations")]
async fn export_uses_client_section_overrides(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/projects",
            &token,
            serde_json::json!({ "title": "Deck", "docType": "pptx", "scaffold": "stored" }),
        )
        .await,
    )
    .await;
    let project_id = created["id"].as_i64().unwrap();

    let response = post_json_auth(
        app,
        &format!("/api/projects/{project_id}/export"),
        &token,
        serde_json::json!({
            "format": "pptx",
            "clientSections": [{ "title": "Override", "content": "client text" }]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body_bytes(response).await;
    let slide = read_part(&bytes, "ppt/slides/slide2.xml");
    assert!(slide.contains("Override"));
    assert!(slide.contains("client text"));
    assert!(!slide.contains("stored"));
}

/// DOCX export includes comments only when requested.
#[sqlx::test(migrations = "../db/migrations")]
async fn export_docx_with_comments(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/projects",
            &token,
            serde_json::json!({ "title": "Report", "docType": "docx", "scaffold": "Body text." }),
        )
        .await,
    )
    .await;
    let project_id = created["id"].as_i64().unwrap();
    let section_id = created["sections"][0]["id"].as_i64().unwrap();

    post_json_auth(
        app.clone(),
        &format!("/api/projects/{project_id}/comment"),
        &token,
        serde_json::json!({ "sectionId": section_id, "comment": "tighten this" }),
    )
    .await;

    let with = post_json_auth(
        app.clone(),
        &format!("/api/projects/{project_id}/export"),
        &token,
        serde_json::json!({ "format": "docx", "includeComments": true }),
    )
    .await;
    assert_eq!(with.status(), StatusCode::OK);
    assert_eq!(
        with.headers().get("content-type").unwrap(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    let document = read_part(&body_bytes(with).await, "word/document.xml");
    assert!(document.contains("Report"));
    assert!(document.contains("Body text."));
    assert!(document.contains("Comment: tighten this"));

    let without = post_json_auth(
        app,
        &format!("/api/projects/{project_id}/export"),
        &token,
        serde_json::json!({ "format": "docx" }),
    )
    .await;
    let document = read_part(&body_bytes(without).await, "word/document.xml");
    assert!(!document.contains("tighten this"));
}

/// Unsupported formats are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn export_unknown_format_is_rejected(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/projects",
            &token,
            serde_json::json!({ "title": "T", "docType": "docx" }),
        )
        .await,
    )
    .await;
    let project_id = created["id"].as_i64().unwrap();

    let response = post_json_auth(
        app,
        &format!("/api/projects/{project_id}/export"),
        &token,
        serde_json::json!({ "format": "txt" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Direct deck rendering
// ---------------------------------------------------------------------------

/// generate_pptx renders a client deck and names the file after its title.
#[sqlx::test(migrations = "../db/migrations")]
async fn generate_pptx_renders_client_deck(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool);

    let deck = serde_json::json!({
        "title": "Job Deck: v2",
        "template": { "name": "modern_minimal", "accentColor": "#111827" },
        "slides": [
            { "type": "title", "title": "Job Deck", "subtitle": "by Alice" },
            { "type": "skills", "title": "Skills", "bullets": ["Rust", "SQL"] }
        ]
    });

    let response = post_json_auth(app, "/api/projects/generate_pptx", &token, deck).await;
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("Job_Deck_v2.pptx"), "got {disposition}");

    let bytes = body_bytes(response).await;
    let slide2 = read_part(&bytes, "ppt/slides/slide2.xml");
    assert!(slide2.contains("Rust"));
    assert!(slide2.contains("SQL"));
    // Template accent flows into the heading strip fill.
    assert!(slide2.contains("111827"));
}

/// generate_pptx requires authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn generate_pptx_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::post_json(
        app,
        "/api/projects/generate_pptx",
        serde_json::json!({ "title": "X", "template": { "name": "t" }, "slides": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// The wizard outline endpoint returns the mock provider's five titles.
#[sqlx::test(migrations = "../db/migrations")]
async fn suggest_outline_returns_titles(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/projects/suggest_outline",
        &token,
        serde_json::json!({ "topic": "Kubernetes", "docType": "docx" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let titles = json["titles"].as_array().unwrap();
    assert_eq!(titles.len(), 5);
    assert_eq!(titles[0], "Kubernetes - Section 1");
}

/// The template suggestion endpoint returns the three built-ins.
#[sqlx::test(migrations = "../db/migrations")]
async fn suggest_templates_returns_builtins(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/projects/suggest_templates",
        &token,
        serde_json::json!({ "topic": "anything" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let templates = json["templates"].as_array().unwrap();
    assert_eq!(templates.len(), 3);
    let names: Vec<&str> = templates
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"professional_clean"));
    assert!(names.contains(&"modern_minimal"));
    assert!(names.contains(&"creative_portfolio"));
}
