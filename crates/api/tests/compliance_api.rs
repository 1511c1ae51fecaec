//! HTTP-level tests for checklists and compliance recording.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_farm, get_auth, put_json_auth, signup};
use serde_json::json;
use sqlx::PgPool;

const POULTRY_ITEMS: [&str; 10] = [
    "Biosecurity plan documented and updated",
    "Access control measures for all entry points",
    "Footbath disinfection at farm entrance",
    "Feed storage protected from contamination",
    "Water system cleaned and tested regularly",
    "Proper disposal of dead birds",
    "Staff hygiene protocols followed",
    "Wild bird exclusion measures implemented",
    "Vaccination schedule maintained",
    "Health monitoring records updated",
];

#[sqlx::test(migrations = "../../db/migrations")]
async fn checklist_is_served_per_farm_type(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "owner@farm.test", "farmer").await;

    let response = get_auth(app.clone(), "/api/v1/compliance/checklists/poultry", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 10);
    assert_eq!(json["data"]["items"][8], "Vaccination schedule maintained");

    let response = get_auth(app, "/api/v1/compliance/checklists/goat", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn report_counts_compliant_non_compliant_and_pending(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "owner@farm.test", "farmer").await;
    let farm_id = create_farm(app.clone(), &token, "poultry").await;
    let uri = format!("/api/v1/farms/{farm_id}/compliance");

    for (i, item) in POULTRY_ITEMS.iter().take(8).enumerate() {
        let body = json!({ "checklist_item": item, "is_compliant": i < 7 });
        let response = put_json_auth(app.clone(), &uri, body, &token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = &body_json(response).await["data"]["summary"];
    assert_eq!(summary["total"], 10);
    assert_eq!(summary["compliant"], 7);
    assert_eq!(summary["non_compliant"], 1);
    assert_eq!(summary["pending"], 2);
    assert_eq!(summary["rate"], 70);
    assert_eq!(summary["tier"], "fair");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rechecking_an_item_overwrites_it(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "owner@farm.test", "farmer").await;
    let farm_id = create_farm(app.clone(), &token, "poultry").await;
    let uri = format!("/api/v1/farms/{farm_id}/compliance");
    let item = POULTRY_ITEMS[0];

    put_json_auth(
        app.clone(),
        &uri,
        json!({ "checklist_item": item, "is_compliant": false }),
        &token,
    )
    .await;
    put_json_auth(
        app.clone(),
        &uri,
        json!({ "checklist_item": item, "is_compliant": true }),
        &token,
    )
    .await;

    let summary = &body_json(get_auth(app, &uri, &token).await).await["data"]["summary"];
    assert_eq!(summary["compliant"], 1);
    assert_eq!(summary["non_compliant"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn item_from_another_checklist_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "owner@farm.test", "farmer").await;
    let farm_id = create_farm(app.clone(), &token, "pig").await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/farms/{farm_id}/compliance"),
        json!({ "checklist_item": "Vaccination schedule maintained", "is_compliant": true }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn researcher_may_view_but_not_record(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = signup(app.clone(), "owner@farm.test", "farmer").await;
    let researcher = signup(app.clone(), "res@farm.test", "researcher").await;
    let farm_id = create_farm(app.clone(), &owner, "poultry").await;
    let uri = format!("/api/v1/farms/{farm_id}/compliance");

    let response = get_auth(app.clone(), &uri, &researcher).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json!({ "checklist_item": POULTRY_ITEMS[0], "is_compliant": true });
    let response = put_json_auth(app, &uri, body, &researcher).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
