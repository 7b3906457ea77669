//! HTTP-level integration tests for project CRUD, owner scoping, and
//! cascade deletion.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth};
use draftdeck_db::repositories::{CommentRepo, RevisionRepo, SectionRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Creating a project with a scaffold seeds one "Introduction" section.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_with_scaffold_seeds_intro_section(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/projects",
        &token,
        serde_json::json!({
            "title": "P1", "docType": "docx", "topic": "x", "scaffold": "Hello"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let project = body_json(response).await;
    assert_eq!(project["title"], "P1");
    assert_eq!(project["docType"], "docx");
    let sections = project["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["title"], "Introduction");
    assert_eq!(sections[0]["content"], "Hello");
    assert_eq!(sections[0]["order_index"], 0);
}

/// Creating a project with only a topic gets placeholder sections from the
/// (mock) outline suggestion, with dense order indices.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_with_topic_creates_placeholder_sections(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/projects",
        &token,
        serde_json::json!({ "title": "P2", "docType": "pptx", "topic": "Databases" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let project = body_json(response).await;
    let sections = project["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 5, "mock outline suggests five titles");
    for (index, section) in sections.iter().enumerate() {
        assert_eq!(section["order_index"], index as i64);
        assert_eq!(section["content"], "");
        assert_eq!(section["draft"], true);
    }
    assert_eq!(sections[0]["title"], "Databases - Slide 1");
}

/// A project with neither scaffold nor topic has an empty sections array.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_bare_project_has_no_sections(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/projects",
        &token,
        serde_json::json!({ "title": "T", "docType": "pptx" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project = body_json(response).await;
    assert_eq!(project["sections"].as_array().unwrap().len(), 0);
}

/// An unknown docType is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_unknown_doc_type(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/projects",
        &token,
        serde_json::json!({ "title": "T", "docType": "pdf" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Owner scoping
// ---------------------------------------------------------------------------

/// Listing shows exactly the caller's projects, never another owner's.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_is_owner_scoped(pool: PgPool) {
    let (_alice, alice_token) = common::create_test_user(&pool, "Alice", "alice@t.com").await;
    let (_bob, bob_token) = common::create_test_user(&pool, "Bob", "bob@t.com").await;
    let app = common::build_test_app(pool);

    let created = post_json_auth(
        app.clone(),
        "/api/projects",
        &alice_token,
        serde_json::json!({ "title": "Alice's", "docType": "docx" }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let alice_list = body_json(get_auth(app.clone(), "/api/projects", &alice_token).await).await;
    assert_eq!(alice_list.as_array().unwrap().len(), 1);
    assert_eq!(alice_list[0]["title"], "Alice's");

    let bob_list = body_json(get_auth(app, "/api/projects", &bob_token).await).await;
    assert_eq!(bob_list.as_array().unwrap().len(), 0);
}

/// Fetching someone else's project behaves exactly like a missing one.
#[sqlx::test(migrations = "../db/migrations")]
async fn get_foreign_project_is_not_found(pool: PgPool) {
    let (_alice, alice_token) = common::create_test_user(&pool, "Alice", "alice@t.com").await;
    let (_bob, bob_token) = common::create_test_user(&pool, "Bob", "bob@t.com").await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/projects",
            &alice_token,
            serde_json::json!({ "title": "Private", "docType": "docx" }),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = get_auth(app, &format!("/api/projects/{id}"), &bob_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// Deleting a project removes its sections, revisions, and comments, and a
/// subsequent GET is 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_cascades_and_then_404(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool.clone());

    // Project with one seeded section.
    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/projects",
            &token,
            serde_json::json!({ "title": "Doomed", "docType": "docx", "scaffold": "text" }),
        )
        .await,
    )
    .await;
    let project_id = created["id"].as_i64().unwrap();
    let section_id = created["sections"][0]["id"].as_i64().unwrap();

    // Attach a revision (via refine) and a comment.
    let refine = post_json_auth(
        app.clone(),
        &format!("/api/projects/{project_id}/refine"),
        &token,
        serde_json::json!({ "sectionId": section_id, "prompt": "improve" }),
    )
    .await;
    assert_eq!(refine.status(), StatusCode::OK);

    let comment = post_json_auth(
        app.clone(),
        &format!("/api/projects/{project_id}/comment"),
        &token,
        serde_json::json!({ "sectionId": section_id, "comment": "nice" }),
    )
    .await;
    assert_eq!(comment.status(), StatusCode::CREATED);

    // Delete.
    let deleted = delete_auth(app.clone(), &format!("/api/projects/{project_id}"), &token).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let json = body_json(deleted).await;
    assert_eq!(json["ok"], true);

    // Everything attached is gone.
    assert!(SectionRepo::list_by_project(&pool, project_id)
        .await
        .unwrap()
        .is_empty());
    assert!(RevisionRepo::list_by_section(&pool, section_id)
        .await
        .unwrap()
        .is_empty());
    assert!(CommentRepo::list_by_section(&pool, section_id)
        .await
        .unwrap()
        .is_empty());

    // GET now 404s; deleting again also 404s.
    let response = get_auth(app.clone(), &format!("/api/projects/{project_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let again = delete_auth(app, &format!("/api/projects/{project_id}"), &token).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Files dump
// ---------------------------------------------------------------------------

/// The files endpoint returns the flat dump of project artifacts.
#[sqlx::test(migrations = "../db/migrations")]
async fn files_returns_flat_dump(pool: PgPool) {
    let (_user, token) = common::create_test_user(&pool, "A", "a@t.com").await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/projects",
            &token,
            serde_json::json!({ "title": "Dump", "docType": "docx", "scaffold": "hello" }),
        )
        .await,
    )
    .await;
    let project_id = created["id"].as_i64().unwrap();

    let response = get_auth(app, &format!("/api/projects/{project_id}/files"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let files = body_json(response).await;

    assert_eq!(files["project"]["title"], "Dump");
    assert_eq!(files["sections"].as_array().unwrap().len(), 1);
    assert!(files["revisions"].is_array());
    assert!(files["comments"].is_array());
    assert!(files["llm_logs"].is_array());
}
