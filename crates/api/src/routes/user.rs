//! Route definitions for the signed-in user's own settings.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// GET /profile      -> get_profile
/// PUT /profile      -> update_profile
/// GET /preferences  -> get_preferences
/// PUT /preferences  -> update_preferences
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(user::get_profile).put(user::update_profile),
        )
        .route(
            "/preferences",
            get(user::get_preferences).put(user::update_preferences),
        )
}
