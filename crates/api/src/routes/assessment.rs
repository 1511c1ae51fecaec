//! Route definitions for the `/assessments` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::assessment;
use crate::state::AppState;

/// Routes mounted at `/assessments`.
///
/// ```text
/// GET  /                 -> list_mine
/// GET  /questions        -> list_questions
/// GET  /{id}             -> get_assessment
/// PUT  /{id}/responses   -> update_responses (draft only)
/// POST /{id}/submit      -> submit_draft
/// POST /{id}/review      -> review_assessment (reviewers)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assessment::list_mine))
        .route("/questions", get(assessment::list_questions))
        .route("/{id}", get(assessment::get_assessment))
        .route("/{id}/responses", put(assessment::update_responses))
        .route("/{id}/submit", post(assessment::submit_draft))
        .route("/{id}/review", post(assessment::review_assessment))
}
