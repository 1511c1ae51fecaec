pub mod admin;
pub mod alert;
pub mod assessment;
pub mod auth;
pub mod compliance;
pub mod dashboard;
pub mod farm;
pub mod health;
pub mod training;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup | /login | /refresh                 public
/// /auth/logout | /me                               requires auth
///
/// /user/profile                                    get, update
/// /user/preferences                                get, update
///
/// /dashboard                                       role-routed dashboard
///
/// /farms                                           list, register
/// /farms/{id}                                      get, update (owner)
/// /farms/{id}/assessments                          list, submit completed
/// /farms/{id}/assessments/drafts                   create draft
/// /farms/{id}/assessments/export                   CSV export
/// /farms/{id}/compliance                           report, upsert one item
///
/// /assessments                                     assessments by me
/// /assessments/questions                           question catalogue
/// /assessments/{id}                                get
/// /assessments/{id}/responses                      update draft responses
/// /assessments/{id}/submit                         draft -> completed
/// /assessments/{id}/review                         completed -> reviewed
///
/// /compliance/checklists/{farm_type}               checklist for a farm type
///
/// /training/modules                                catalog with progress
/// /training/modules/{id}                           module detail
/// /training/modules/{id}/start | /progress | /complete
///
/// /alerts                                          alert centre
/// /alerts/unread-count | /export | /read-all
/// /alerts/{id}/read                                mark one read
///
/// /admin/training/modules                          list, create (ManageTraining)
/// /admin/training/modules/{id}                     update (ManageTraining)
/// /admin/alerts                                    list, broadcast (BroadcastAlerts)
/// /admin/alerts/{id}/deactivate                    deactivate (BroadcastAlerts)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user", user::router())
        .nest("/dashboard", dashboard::router())
        .nest("/farms", farm::router())
        .nest("/assessments", assessment::router())
        .nest("/compliance", compliance::router())
        .nest("/training", training::router())
        .nest("/alerts", alert::router())
        .nest("/admin", admin::router())
}
