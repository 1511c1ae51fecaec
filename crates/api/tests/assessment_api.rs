//! HTTP-level tests for scoring, the draft workflow, review and export.

mod common;

use axum::http::StatusCode;
use common::{
    answers, body_json, body_text, create_farm, get_auth, post_json_auth, put_json_auth, signup,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn incomplete_submission_is_rejected_and_not_stored(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "owner@farm.test", "farmer").await;
    let farm_id = create_farm(app.clone(), &token, "pig").await;
    let uri = format!("/api/v1/farms/{farm_id}/assessments");

    let body = json!({ "responses": { "biosecurity_plan": "yes", "visitor_control": "no" } });
    let response = post_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(app, &uri, &token).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn six_of_eight_scores_75_medium(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "owner@farm.test", "farmer").await;
    let farm_id = create_farm(app.clone(), &token, "pig").await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/farms/{farm_id}/assessments"),
        json!({ "responses": answers(6) }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["outcome"]["risk_score"], 75);
    assert_eq!(json["data"]["outcome"]["risk_level"], "medium");
    assert_eq!(json["data"]["assessment"]["status"], "completed");
    assert_eq!(
        json["data"]["outcome"]["improvement_areas"].as_array().unwrap().len(),
        2
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_answer_value_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "owner@farm.test", "farmer").await;
    let farm_id = create_farm(app.clone(), &token, "pig").await;

    let mut responses = answers(8);
    responses["staff_training"] = json!("maybe");
    let response = post_json_auth(
        app,
        &format!("/api/v1/farms/{farm_id}/assessments"),
        json!({ "responses": responses }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn draft_submit_review_workflow(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = signup(app.clone(), "owner@farm.test", "farmer").await;
    let vet = signup(app.clone(), "vet@farm.test", "veterinarian").await;
    let farm_id = create_farm(app.clone(), &owner, "poultry").await;

    // The veterinarian starts a partial draft report.
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/farms/{farm_id}/assessments/drafts"),
        json!({ "responses": { "biosecurity_plan": "yes" } }),
        &vet,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let draft = body_json(response).await;
    let id = draft["data"]["id"].as_i64().unwrap();
    assert_eq!(draft["data"]["status"], "draft");
    assert_eq!(draft["data"]["answer_progress_pct"], 13);

    // Submitting with missing answers fails; the draft stays a draft.
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/assessments/{id}/submit"),
        json!({}),
        &vet,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/assessments/{id}/responses"),
        json!({ "responses": answers(8) }),
        &vet,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/assessments/{id}/submit"),
        json!({}),
        &vet,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let submitted = body_json(response).await;
    assert_eq!(submitted["data"]["outcome"]["risk_score"], 100);
    assert_eq!(submitted["data"]["outcome"]["risk_level"], "low");

    // A second submit is an illegal transition.
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/assessments/{id}/submit"),
        json!({}),
        &vet,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Farmers may not review.
    let review_uri = format!("/api/v1/assessments/{id}/review");
    let response = post_json_auth(app.clone(), &review_uri, json!({}), &owner).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        app.clone(),
        &review_uri,
        json!({ "review_notes": "Looks good" }),
        &vet,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "reviewed");

    // The report shows up under the veterinarian's own assessments.
    let response = get_auth(app, "/api/v1/assessments", &vet).await;
    assert_eq!(body_json(response).await["data"][0]["id"], id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn researchers_cannot_assess(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = signup(app.clone(), "owner@farm.test", "farmer").await;
    let researcher = signup(app.clone(), "res@farm.test", "researcher").await;
    let farm_id = create_farm(app.clone(), &owner, "pig").await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/farms/{farm_id}/assessments"),
        json!({ "responses": answers(8) }),
        &researcher,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn questions_and_csv_export(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "owner@farm.test", "farmer").await;
    let farm_id = create_farm(app.clone(), &token, "pig").await;

    let response = get_auth(app.clone(), "/api/v1/assessments/questions", &token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 8);

    post_json_auth(
        app.clone(),
        &format!("/api/v1/farms/{farm_id}/assessments"),
        json!({ "responses": answers(4), "recommendations": "Fix the fence, then the gate" }),
        &token,
    )
    .await;

    let response = get_auth(
        app,
        &format!("/api/v1/farms/{farm_id}/assessments/export"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    let csv = body_text(response).await;
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("\"Fix the fence, then the gate\""));
}
