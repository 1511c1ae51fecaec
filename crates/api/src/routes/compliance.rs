use axum::routing::get;
use axum::Router;

use crate::handlers::compliance;
use crate::state::AppState;

/// Routes mounted at `/compliance`.
///
/// ```text
/// GET /checklists/{farm_type} -> get_checklist
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/checklists/{farm_type}", get(compliance::get_checklist))
}
