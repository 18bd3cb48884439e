//! HTTP-level integration tests for the `/api/projects` endpoints.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{delete_auth, expect_json, get, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_project_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "p@example.com").await;

    let response = post_json_auth(
        app,
        "/api/projects",
        &token,
        json!({ "name": "  First Song ", "description": "   " }),
    )
    .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["message"], "Project created successfully");

    let project = &json["data"]["project"];
    assert_eq!(project["name"], "First Song");
    assert!(project["description"].is_null());
    assert_eq!(project["bpm"], 120);
    assert_eq!(project["key_signature"], "C");
    assert_eq!(project["time_signature"], "4/4");
    assert_eq!(project["status"], "draft");
    assert_eq!(project["duration"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bpm_bounds(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "bpm@example.com").await;

    let response = post_json_auth(
        app.clone(),
        "/api/projects",
        &token,
        json!({ "name": "Fast", "bpm": 250 }),
    )
    .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["project"]["bpm"], 250);

    for bpm in [59, 301] {
        let response = post_json_auth(
            app.clone(),
            "/api/projects",
            &token,
            json!({ "name": "Out of range", "bpm": bpm }),
        )
        .await;
        let json = expect_json(response, StatusCode::BAD_REQUEST).await;
        assert_eq!(json["error"], "BPM must be between 60 and 300");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "n@example.com").await;

    let response = post_json_auth(app, "/api/projects", &token, json!({ "bpm": 100 })).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Project name is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_projects_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/projects").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_only_own_projects(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = common::register(&app, "alice@example.com").await;
    let bob = common::register(&app, "bob@example.com").await;

    common::create_project(&app, &alice, "A1").await;
    common::create_project(&app, &alice, "A2").await;
    common::create_project(&app, &bob, "B1").await;

    let response = get_auth(app, "/api/projects", &alice).await;
    let json = expect_json(response, StatusCode::OK).await;
    let projects = json["data"]["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 2);
    // Most recently updated first.
    assert_eq!(projects[0]["name"], "A2");
    assert_eq!(projects[1]["name"], "A1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "u@example.com").await;
    let id = common::create_project(&app, &token, "Draft").await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/projects/{id}"),
        &token,
        json!({ "description": "Verse ideas", "status": "in_progress" }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    let project = &json["data"]["project"];
    assert_eq!(project["name"], "Draft");
    assert_eq!(project["description"], "Verse ideas");
    assert_eq!(project["status"], "in_progress");
    assert_eq!(project["bpm"], 120);

    // An empty string clears the description.
    let response = put_json_auth(
        app,
        &format!("/api/projects/{id}"),
        &token,
        json!({ "description": "" }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert!(json["data"]["project"]["description"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "v@example.com").await;
    let id = common::create_project(&app, &token, "Song").await;
    let uri = format!("/api/projects/{id}");

    let cases = [
        (json!({ "name": "  " }), "Project name cannot be empty"),
        (json!({ "status": "published" }), "Invalid project status"),
        (json!({ "bpm": 400 }), "BPM must be between 60 and 300"),
        (json!({ "duration": -1.0 }), "Duration must be non-negative"),
    ];
    for (body, message) in cases {
        let response = put_json_auth(app.clone(), &uri, &token, body).await;
        let json = expect_json(response, StatusCode::BAD_REQUEST).await;
        assert_eq!(json["error"], message);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cross_user_access_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = common::register(&app, "owner@example.com").await;
    let intruder = common::register(&app, "intruder@example.com").await;
    let id = common::create_project(&app, &owner, "Private").await;
    let uri = format!("/api/projects/{id}");

    let response = get_auth(app.clone(), &uri, &intruder).await;
    let json = expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["error"], "Project not found");

    let response = put_json_auth(app.clone(), &uri, &intruder, json!({ "name": "Mine" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &uri, &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Untouched for the owner.
    let response = get_auth(app, &uri, &owner).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["project"]["name"], "Private");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "d@example.com").await;
    let id = common::create_project(&app, &token, "Scrap").await;
    let uri = format!("/api/projects/{id}");

    let response = delete_auth(app.clone(), &uri, &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["message"], "Project deleted successfully");

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_json_is_400_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "j@example.com").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/projects")
        .header("Authorization", format!("Bearer {token}"))
        .header("Content-Type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "INVALID_JSON");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_id_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "id@example.com").await;

    let response = get_auth(app, "/api/projects/not-a-uuid", &token).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "INVALID_PATH");
}
