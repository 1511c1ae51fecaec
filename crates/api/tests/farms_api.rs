//! HTTP-level tests for farm registration and the farm access policy.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_farm, get_auth, post_json_auth, put_json_auth, signup};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_registers_and_lists_farms(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "owner@farm.test", "farmer").await;
    let farm_id = create_farm(app.clone(), &token, "pig").await;

    let response = get_auth(app.clone(), "/api/v1/farms", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["id"], farm_id);

    let response = get_auth(app, &format!("/api/v1/farms/{farm_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["farm_type"], "pig");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_farm_fields_are_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "owner@farm.test", "farmer").await;

    let bad_type = json!({ "name": "X", "farm_type": "cattle", "location": "Y" });
    let response = post_json_auth(app.clone(), "/api/v1/farms", bad_type, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let negative = json!({ "name": "X", "farm_type": "pig", "location": "Y", "animal_count": -1 });
    let response = post_json_auth(app, "/api/v1/farms", negative, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_farmers_cannot_see_a_farm(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = signup(app.clone(), "owner@farm.test", "farmer").await;
    let stranger = signup(app.clone(), "stranger@farm.test", "farmer").await;
    let farm_id = create_farm(app.clone(), &owner, "poultry").await;

    let response = get_auth(app, &format!("/api/v1/farms/{farm_id}"), &stranger).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn veterinarian_views_but_cannot_edit(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = signup(app.clone(), "owner@farm.test", "farmer").await;
    let vet = signup(app.clone(), "vet@farm.test", "veterinarian").await;
    let farm_id = create_farm(app.clone(), &owner, "mixed").await;
    let uri = format!("/api/v1/farms/{farm_id}");

    let response = get_auth(app.clone(), &uri, &vet).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(app.clone(), &uri, json!({ "name": "Renamed" }), &vet).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app, &uri, json!({ "name": "Renamed" }), &owner).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Renamed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn all_scope_requires_view_all_farms(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = signup(app.clone(), "owner@farm.test", "farmer").await;
    let regulator = signup(app.clone(), "reg@farm.test", "regulator").await;
    create_farm(app.clone(), &owner, "pig").await;

    let response = get_auth(app.clone(), "/api/v1/farms?scope=all", &owner).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/v1/farms?scope=all", &regulator).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}
