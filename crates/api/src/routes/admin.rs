//! Route definitions for the `/admin` management pages.
//!
//! Role checks happen in the handlers' extractors, so each route carries the
//! permission it needs in its handler signature.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{alert_admin, training_admin};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /training/modules        -> list_all_modules (ManageTraining)
/// POST /training/modules        -> create_module (ManageTraining)
/// PUT  /training/modules/{id}   -> update_module (ManageTraining)
/// GET  /alerts                  -> list_alerts (BroadcastAlerts)
/// POST /alerts                  -> create_alert (BroadcastAlerts)
/// POST /alerts/{id}/deactivate  -> deactivate_alert (BroadcastAlerts)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/training/modules",
            get(training_admin::list_all_modules).post(training_admin::create_module),
        )
        .route("/training/modules/{id}", put(training_admin::update_module))
        .route(
            "/alerts",
            get(alert_admin::list_alerts).post(alert_admin::create_alert),
        )
        .route("/alerts/{id}/deactivate", post(alert_admin::deactivate_alert))
}
