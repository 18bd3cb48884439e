//! HTTP-level integration tests for the `/api/tracks` endpoints.

mod common;

use axum::http::StatusCode;
use common::{delete_auth, expect_json, get_auth, post_json_auth, put_json_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

fn midi_payload() -> Value {
    json!({
        "notes": [
            { "id": "n1", "note": 60, "velocity": 100, "startTime": 0.0, "duration": 1.0 },
            { "id": "n2", "note": 64, "velocity": 90, "startTime": 1.0, "duration": 0.5 }
        ]
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_track_defaults_and_order(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "t@example.com").await;
    let project_id = common::create_project(&app, &token, "Beat").await;

    let first =
        common::create_track(&app, &token, &project_id, json!({ "name": "Kick", "type": "drums" }))
            .await;
    assert_eq!(first["order_index"], 0);
    assert_eq!(first["type"], "drums");
    assert_eq!(first["volume"], 1.0);
    assert_eq!(first["pan"], 0.0);
    assert_eq!(first["muted"], false);
    assert_eq!(first["solo"], false);
    assert_eq!(first["color"], "#3B82F6");
    assert_eq!(first["effects"], json!([]));
    assert_eq!(first["automation"], json!({}));
    assert!(first["midi_data"].is_null());

    let second = common::create_track(
        &app,
        &token,
        &project_id,
        json!({ "name": "Pad", "type": "synth", "order_index": 7 }),
    )
    .await;
    assert_eq!(second["order_index"], 7);

    let third =
        common::create_track(&app, &token, &project_id, json!({ "name": "Bass", "type": "bass" }))
            .await;
    assert_eq!(third["order_index"], 8);

    let response = get_auth(
        app,
        &format!("/api/tracks?project_id={project_id}"),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    let names: Vec<&str> = json["data"]["tracks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Kick", "Pad", "Bass"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_requires_project_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "q@example.com").await;

    let response = get_auth(app, "/api/tracks", &token).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["error"], "Project ID is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "cv@example.com").await;
    let project_id = common::create_project(&app, &token, "Song").await;

    let cases = [
        (
            json!({ "name": "No project", "type": "audio" }),
            "Project ID, name, and type are required",
        ),
        (
            json!({ "project_id": project_id, "type": "audio" }),
            "Project ID, name, and type are required",
        ),
        (
            json!({ "project_id": project_id, "name": "Bad", "type": "kazoo" }),
            "Invalid track type",
        ),
        (
            json!({ "project_id": project_id, "name": "Loud", "type": "audio", "volume": 2.5 }),
            "Volume must be between 0 and 2",
        ),
        (
            json!({ "project_id": project_id, "name": "Wide", "type": "audio", "pan": -1.5 }),
            "Pan must be between -1 and 1",
        ),
        (
            json!({
                "project_id": project_id,
                "name": "Take 1",
                "type": "audio",
                "midi_data": midi_payload()
            }),
            "MIDI data is not supported on audio tracks",
        ),
        (
            json!({
                "project_id": project_id,
                "name": "Wet",
                "type": "synth",
                "effects": [{
                    "id": "r1",
                    "params": { "type": "reverb", "roomSize": 2.0, "decay": 1.5, "wet": 0.3 }
                }]
            }),
            "Effect 'r1': roomSize must be between 0 and 1",
        ),
    ];

    for (body, message) in cases {
        let response = post_json_auth(app.clone(), "/api/tracks", &token, body).await;
        let json = expect_json(response, StatusCode::BAD_REQUEST).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], message);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_effects_stored_in_signal_order(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "fx@example.com").await;
    let project_id = common::create_project(&app, &token, "Song").await;

    let track = common::create_track(
        &app,
        &token,
        &project_id,
        json!({
            "name": "Lead",
            "type": "synth",
            "effects": [
                { "id": "d1", "order": 2, "params": { "type": "delay", "delayTime": 0.25, "feedback": 0.3, "wet": 0.2 } },
                { "id": "r1", "order": 1, "params": { "type": "reverb", "roomSize": 0.3, "decay": 1.5, "wet": 0.3 } }
            ]
        }),
    )
    .await;

    let effects = track["effects"].as_array().unwrap();
    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0]["id"], "r1");
    assert_eq!(effects[0]["enabled"], true);
    assert_eq!(effects[1]["id"], "d1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_midi_rules_on_update(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "midi@example.com").await;
    let project_id = common::create_project(&app, &token, "Song").await;

    let track = common::create_track(
        &app,
        &token,
        &project_id,
        json!({ "name": "Keys", "type": "instrument", "midi_data": midi_payload() }),
    )
    .await;
    assert_eq!(track["midi_data"]["notes"].as_array().unwrap().len(), 2);
    let uri = format!("/api/tracks/{}", track["id"].as_str().unwrap());

    // Switching to audio while notes remain is rejected.
    let response = put_json_auth(app.clone(), &uri, &token, json!({ "type": "audio" })).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["error"], "MIDI data is not supported on audio tracks");

    // Clearing the notes in the same request is allowed.
    let response = put_json_auth(
        app.clone(),
        &uri,
        &token,
        json!({ "type": "audio", "midi_data": null }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["message"], "Track updated successfully");
    assert_eq!(json["data"]["track"]["type"], "audio");
    assert!(json["data"]["track"]["midi_data"].is_null());
    assert_eq!(json["data"]["track"]["name"], "Keys");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_keeps_other_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "pu@example.com").await;
    let project_id = common::create_project(&app, &token, "Song").await;

    let track = common::create_track(
        &app,
        &token,
        &project_id,
        json!({ "name": "Vox", "type": "vocal", "instrument": "SM7B", "pan": -0.25 }),
    )
    .await;
    let uri = format!("/api/tracks/{}", track["id"].as_str().unwrap());

    let response = put_json_auth(
        app.clone(),
        &uri,
        &token,
        json!({ "muted": true, "volume": 0.5, "instrument": "" }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    let updated = &json["data"]["track"];
    assert_eq!(updated["muted"], true);
    assert_eq!(updated["volume"], 0.5);
    assert_eq!(updated["pan"], -0.25);
    assert!(updated["instrument"].is_null());

    let response = put_json_auth(app, &uri, &token, json!({ "color": "blue" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cross_user_track_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = common::register(&app, "own@example.com").await;
    let intruder = common::register(&app, "other@example.com").await;
    let project_id = common::create_project(&app, &owner, "Mine").await;
    let track =
        common::create_track(&app, &owner, &project_id, json!({ "name": "Gtr", "type": "audio" }))
            .await;
    let uri = format!("/api/tracks/{}", track["id"].as_str().unwrap());

    let response = get_auth(app.clone(), &uri, &intruder).await;
    let json = expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["error"], "Track not found");

    let response = put_json_auth(app.clone(), &uri, &intruder, json!({ "muted": true })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &uri, &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        app.clone(),
        &format!("/api/tracks?project_id={project_id}"),
        &intruder,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Creating into someone else's project is also a miss.
    let response = post_json_auth(
        app,
        "/api/tracks",
        &intruder,
        json!({ "project_id": project_id, "name": "Sneaky", "type": "audio" }),
    )
    .await;
    let json = expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["error"], "Project not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_track(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::register(&app, "del@example.com").await;
    let project_id = common::create_project(&app, &token, "Song").await;
    let track =
        common::create_track(&app, &token, &project_id, json!({ "name": "Hat", "type": "drums" }))
            .await;
    let uri = format!("/api/tracks/{}", track["id"].as_str().unwrap());

    let response = delete_auth(app.clone(), &uri, &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["message"], "Track deleted successfully");

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
