//! Route definitions for the reader-facing alert centre.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::alert;
use crate::state::AppState;

/// Routes mounted at `/alerts`.
///
/// ```text
/// GET  /               -> list_alerts (?q&severity&status&farm_type&location)
/// GET  /unread-count   -> unread_count
/// GET  /export         -> export_alerts (CSV)
/// POST /read-all       -> mark_all_read
/// POST /{id}/read      -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alert::list_alerts))
        .route("/unread-count", get(alert::unread_count))
        .route("/export", get(alert::export_alerts))
        .route("/read-all", post(alert::mark_all_read))
        .route("/{id}/read", post(alert::mark_read))
}
