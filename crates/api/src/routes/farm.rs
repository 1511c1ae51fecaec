//! Route definitions for the `/farms` resource and its farm-scoped
//! assessment and compliance sub-resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{assessment, compliance, farm};
use crate::state::AppState;

/// Routes mounted at `/farms`.
///
/// ```text
/// GET  /                          -> list_farms (?scope=mine|all)
/// POST /                          -> create_farm
/// GET  /{id}                      -> get_farm
/// PUT  /{id}                      -> update_farm (owner)
/// GET  /{id}/assessments          -> list_for_farm
/// POST /{id}/assessments          -> submit_assessment
/// POST /{id}/assessments/drafts   -> create_draft
/// GET  /{id}/assessments/export   -> export_for_farm (CSV)
/// GET  /{id}/compliance           -> get_report
/// PUT  /{id}/compliance           -> record_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(farm::list_farms).post(farm::create_farm))
        .route("/{id}", get(farm::get_farm).put(farm::update_farm))
        .route(
            "/{id}/assessments",
            get(assessment::list_for_farm).post(assessment::submit_assessment),
        )
        .route("/{id}/assessments/drafts", post(assessment::create_draft))
        .route("/{id}/assessments/export", get(assessment::export_for_farm))
        .route(
            "/{id}/compliance",
            get(compliance::get_report).put(compliance::record_item),
        )
}
