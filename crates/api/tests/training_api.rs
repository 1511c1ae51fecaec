//! HTTP-level tests for training authoring, the catalog and progress.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_auth, post_json_auth, put_json_auth, signup};
use serde_json::json;
use sqlx::PgPool;

async fn publish_module(app: axum::Router, token: &str, title: &str, farm_type: &str) -> i64 {
    let body = json!({
        "title": title,
        "description": "Entry controls",
        "duration_minutes": 20,
        "farm_type": farm_type,
        "is_published": true,
    });
    let response = post_json_auth(app, "/api/v1/admin/training/modules", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn farmers_cannot_author_modules(pool: PgPool) {
    let app = common::build_test_app(pool);
    let farmer = signup(app.clone(), "f@farm.test", "farmer").await;

    let body = json!({ "title": "X", "duration_minutes": 10 });
    let response = post_json_auth(app, "/api/v1/admin/training/modules", body, &farmer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_content_gets_a_starter_outline(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup(app.clone(), "ext@farm.test", "extension_worker").await;

    let body = json!({ "title": "Footbaths", "duration_minutes": 15, "farm_type": "poultry" });
    let response = post_json_auth(app, "/api/v1/admin/training/modules", body, &author).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let text = json["data"]["content"]["text"].as_str().unwrap();
    assert!(text.contains("poultry farms"));
    assert_eq!(json["data"]["is_published"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_duration_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup(app.clone(), "ext@farm.test", "extension_worker").await;

    let body = json!({ "title": "Too short", "duration_minutes": 0 });
    let response = post_json_auth(app, "/api/v1/admin/training/modules", body, &author).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unpublished_modules_are_hidden_from_learners(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup(app.clone(), "ext@farm.test", "extension_worker").await;
    let farmer = signup(app.clone(), "f@farm.test", "farmer").await;

    let body = json!({ "title": "Draft module", "duration_minutes": 10 });
    let response =
        post_json_auth(app.clone(), "/api/v1/admin/training/modules", body, &author).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), "/api/v1/training/modules", &farmer).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());

    let response = get_auth(app.clone(), &format!("/api/v1/training/modules/{id}"), &farmer).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Publishing makes it visible.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/training/modules/{id}"),
        json!({ "is_published": true }),
        &author,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/v1/training/modules", &farmer).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn catalog_filters_by_farm_type(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup(app.clone(), "ext@farm.test", "extension_worker").await;
    let farmer = signup(app.clone(), "f@farm.test", "farmer").await;
    publish_module(app.clone(), &author, "Pig hygiene", "pig").await;
    publish_module(app.clone(), &author, "Poultry hygiene", "poultry").await;

    let response = get_auth(app.clone(), "/api/v1/training/modules?farm_type=pig", &farmer).await;
    let json = body_json(response).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Pig hygiene"]);

    let response = get_auth(app, "/api/v1/training/modules?farm_type=horse", &farmer).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_lifecycle(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup(app.clone(), "ext@farm.test", "extension_worker").await;
    let farmer = signup(app.clone(), "f@farm.test", "farmer").await;
    let id = publish_module(app.clone(), &author, "Visitors", "pig").await;
    let base = format!("/api/v1/training/modules/{id}");

    // Starting twice keeps a single row at 0 %.
    let first = body_json(post_auth(app.clone(), &format!("{base}/start"), &farmer).await).await;
    let second = body_json(post_auth(app.clone(), &format!("{base}/start"), &farmer).await).await;
    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(second["data"]["progress_pct"], 0);

    // Out-of-range input is clamped; reaching 100 completes.
    let response = put_json_auth(
        app.clone(),
        &format!("{base}/progress"),
        json!({ "progress_pct": 150.0 }),
        &farmer,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["progress_pct"], 100);
    assert_eq!(json["data"]["completed"], true);

    // Lowering progress afterwards keeps the completion.
    let response = put_json_auth(
        app.clone(),
        &format!("{base}/progress"),
        json!({ "progress_pct": 30.4 }),
        &farmer,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["progress_pct"], 30);
    assert_eq!(json["data"]["completed"], true);
    assert_eq!(json["data"]["consistent"], false);

    let response = get_auth(app.clone(), &base, &farmer).await;
    assert_eq!(body_json(response).await["data"]["progress"]["completed"], true);

    let response = get_auth(app, "/api/v1/training/modules?status=completed", &farmer).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn complete_marks_full_progress(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup(app.clone(), "ext@farm.test", "extension_worker").await;
    let farmer = signup(app.clone(), "f@farm.test", "farmer").await;
    let id = publish_module(app.clone(), &author, "Vehicles", "mixed").await;

    let response = post_auth(
        app,
        &format!("/api/v1/training/modules/{id}/complete"),
        &farmer,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["progress_pct"], 100);
    assert_eq!(json["data"]["completed"], true);
    assert!(json["data"]["completed_at"].is_string());
}
