//! Alert broadcasting for regulators.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use biosecure_core::alert::{
    validate_expiry, Severity, ALERT_LIST_LIMIT, MAX_MESSAGE_LENGTH, MAX_TITLE_LENGTH,
};
use biosecure_core::error::CoreError;
use biosecure_core::types::{DbId, Timestamp};
use biosecure_db::models::alert::{Alert, CreateAlert};
use biosecure_db::repositories::AlertRepo;
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::farm::parse_farm_type;
use crate::middleware::rbac::RequireAlertBroadcaster;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/alerts`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAlertRequest {
    pub title: String,
    pub message: String,
    pub severity: String,
    pub farm_type: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub expires_at: Option<Timestamp>,
}

fn required_text(field: &str, value: &str, max: usize) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > max {
        return Err(AppError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// GET /api/v1/admin/alerts
///
/// Recent alerts regardless of liveness.
pub async fn list_alerts(
    State(state): State<AppState>,
    RequireAlertBroadcaster(_user): RequireAlertBroadcaster,
) -> AppResult<Json<DataResponse<Vec<Alert>>>> {
    let alerts = AlertRepo::list_recent(&state.pool, ALERT_LIST_LIMIT).await?;
    Ok(Json(DataResponse { data: alerts }))
}

/// POST /api/v1/admin/alerts
pub async fn create_alert(
    State(state): State<AppState>,
    RequireAlertBroadcaster(user): RequireAlertBroadcaster,
    Json(input): Json<CreateAlertRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Alert>>)> {
    input.validate()?;
    let title = required_text("title", &input.title, MAX_TITLE_LENGTH)?;
    let message = required_text("message", &input.message, MAX_MESSAGE_LENGTH)?;
    let severity = Severity::from_str_value(input.severity.trim()).map_err(AppError::validation)?;
    validate_expiry(input.expires_at, Utc::now()).map_err(AppError::validation)?;
    let farm_type = input
        .farm_type
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(parse_farm_type)
        .transpose()?;
    let location = input
        .location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    let create = CreateAlert {
        title,
        message,
        severity: severity.as_str().to_string(),
        farm_type: farm_type.map(|ft| ft.as_str().to_string()),
        location,
        expires_at: input.expires_at,
        created_by: user.user_id,
    };
    let alert = AlertRepo::create(&state.pool, &create).await?;

    tracing::info!(
        alert_id = alert.id,
        severity = %alert.severity,
        created_by = user.user_id,
        "Alert broadcast"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: alert })))
}

/// POST /api/v1/admin/alerts/{id}/deactivate
pub async fn deactivate_alert(
    State(state): State<AppState>,
    RequireAlertBroadcaster(user): RequireAlertBroadcaster,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Alert>>> {
    let alert = AlertRepo::deactivate(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Alert", id }))?;

    tracing::info!(alert_id = id, deactivated_by = user.user_id, "Alert deactivated");
    Ok(Json(DataResponse { data: alert }))
}
