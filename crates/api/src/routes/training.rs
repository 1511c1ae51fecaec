//! Route definitions for the learner-facing training catalog.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::training;
use crate::state::AppState;

/// Routes mounted at `/training`.
///
/// ```text
/// GET  /modules                 -> list_modules (?farm_type&q&status&sort)
/// GET  /modules/{id}            -> get_module
/// POST /modules/{id}/start      -> start_module
/// PUT  /modules/{id}/progress   -> update_progress
/// POST /modules/{id}/complete   -> complete_module
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/modules", get(training::list_modules))
        .route("/modules/{id}", get(training::get_module))
        .route("/modules/{id}/start", post(training::start_module))
        .route("/modules/{id}/progress", put(training::update_progress))
        .route("/modules/{id}/complete", post(training::complete_module))
}
