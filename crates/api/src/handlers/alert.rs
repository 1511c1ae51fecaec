//! Reader-facing alert centre: listing, read receipts, unread count, export.
//!
//! Filtering runs in Rust over the most recent [`ALERT_LIST_LIMIT`] alerts so
//! every endpoint here applies exactly the same liveness and scope rules.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use biosecure_core::alert::{
    in_scope, is_live, matches_active, matches_query, reaches_any_farm_type, ActiveFilter, Severity,
    ALERT_LIST_LIMIT,
};
use biosecure_core::error::CoreError;
use biosecure_core::export::CsvBuilder;
use biosecure_core::farm::FarmType;
use biosecure_core::types::{DbId, Timestamp};
use biosecure_db::models::alert::AlertWithReadState;
use biosecure_db::repositories::{AlertReadRepo, AlertRepo};
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::farm::parse_farm_type;
use crate::middleware::auth::AuthUser;
use crate::query::AlertListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// An alert as one reader sees it.
#[derive(Debug, Serialize)]
pub struct AlertView {
    pub id: DbId,
    pub title: String,
    pub message: String,
    pub severity: String,
    pub farm_type: Option<String>,
    pub location: Option<String>,
    pub is_active: bool,
    /// Active and not past `expires_at`.
    pub is_live: bool,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: usize,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub marked: u64,
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Parsed form of [`AlertListParams`].
struct AlertFilter {
    query: Option<String>,
    severity: Option<Severity>,
    status: ActiveFilter,
    farm_type: Option<FarmType>,
    location: Option<String>,
}

impl AlertFilter {
    fn from_params(params: AlertListParams) -> AppResult<Self> {
        let severity = params
            .severity
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| Severity::from_str_value(s.trim()))
            .transpose()
            .map_err(AppError::validation)?;
        let farm_type = params
            .farm_type
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(parse_farm_type)
            .transpose()?;
        Ok(Self {
            query: params.q,
            severity,
            status: params.status,
            farm_type,
            location: params.location,
        })
    }

    /// Default filter: live alerts in any scope.
    fn live_only() -> Self {
        Self {
            query: None,
            severity: None,
            status: ActiveFilter::Active,
            farm_type: None,
            location: None,
        }
    }

    fn accepts(&self, row: &AlertWithReadState, live: bool) -> bool {
        // Rows with an unrecognised farm type are treated as unscoped.
        let alert_type = row
            .farm_type
            .as_deref()
            .and_then(|s| FarmType::from_str_value(s).ok());
        in_scope(
            alert_type,
            row.location.as_deref(),
            self.farm_type,
            self.location.as_deref(),
        ) && matches_query(&row.title, &row.message, self.query.as_deref())
            && matches_active(live, self.status)
            && self
                .severity
                .map_or(true, |s| row.severity == s.as_str())
    }
}

/// The reader's alerts after filtering, newest first.
async fn visible_alerts(
    state: &AppState,
    user_id: DbId,
    filter: &AlertFilter,
) -> AppResult<Vec<AlertView>> {
    let now = Utc::now();
    let rows = AlertRepo::list_recent_for_reader(&state.pool, user_id, ALERT_LIST_LIMIT).await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let live = is_live(row.is_active, row.expires_at, now);
            filter.accepts(&row, live).then(|| AlertView {
                id: row.id,
                title: row.title,
                message: row.message,
                severity: row.severity,
                farm_type: row.farm_type,
                location: row.location,
                is_active: row.is_active,
                is_live: live,
                expires_at: row.expires_at,
                created_at: row.created_at,
                is_read: row.read_at.is_some(),
                read_at: row.read_at,
            })
        })
        .collect())
}

/// Unread live alerts for a reader whose farm type scope matches one of
/// `farm_types`. An empty slice counts every scope.
pub(crate) async fn unread_live_count(
    state: &AppState,
    user_id: DbId,
    farm_types: &[FarmType],
) -> AppResult<usize> {
    let alerts = visible_alerts(state, user_id, &AlertFilter::live_only()).await?;
    Ok(alerts
        .iter()
        .filter(|a| !a.is_read)
        .filter(|a| {
            let alert_type = a
                .farm_type
                .as_deref()
                .and_then(|s| FarmType::from_str_value(s).ok());
            reaches_any_farm_type(alert_type, farm_types)
        })
        .count())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/alerts?q=&severity=&status=&farm_type=&location=
pub async fn list_alerts(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<AlertListParams>,
) -> AppResult<Json<DataResponse<Vec<AlertView>>>> {
    let filter = AlertFilter::from_params(params)?;
    let alerts = visible_alerts(&state, user.user_id, &filter).await?;
    Ok(Json(DataResponse { data: alerts }))
}

/// GET /api/v1/alerts/unread-count
///
/// Accepts the same filters as the list; counts unread entries among them.
pub async fn unread_count(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<AlertListParams>,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let filter = AlertFilter::from_params(params)?;
    let alerts = visible_alerts(&state, user.user_id, &filter).await?;
    Ok(Json(DataResponse {
        data: UnreadCount {
            unread: alerts.iter().filter(|a| !a.is_read).count(),
        },
    }))
}

/// POST /api/v1/alerts/read-all
///
/// Marks every alert the filters select as read. Returns the number of new
/// receipts.
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<AlertListParams>,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    let filter = AlertFilter::from_params(params)?;
    let ids: Vec<DbId> = visible_alerts(&state, user.user_id, &filter)
        .await?
        .into_iter()
        .filter(|a| !a.is_read)
        .map(|a| a.id)
        .collect();
    let marked = AlertReadRepo::mark_many_read(&state.pool, user.user_id, &ids).await?;

    tracing::info!(user_id = user.user_id, marked, "Alerts marked read");
    Ok(Json(DataResponse {
        data: MarkedRead { marked },
    }))
}

/// POST /api/v1/alerts/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    AlertRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Alert", id }))?;
    AlertReadRepo::mark_read(&state.pool, user.user_id, id).await?;

    tracing::info!(alert_id = id, user_id = user.user_id, "Alert marked read");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/alerts/export
///
/// The filtered alert list as `text/csv`.
pub async fn export_alerts(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<AlertListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = AlertFilter::from_params(params)?;
    let alerts = visible_alerts(&state, user.user_id, &filter).await?;

    let mut csv = CsvBuilder::new(&[
        "id",
        "title",
        "severity",
        "farm_type",
        "location",
        "status",
        "read",
        "created_at",
        "expires_at",
        "message",
    ]);
    for a in &alerts {
        csv.row([
            a.id.to_string(),
            a.title.clone(),
            a.severity.clone(),
            a.farm_type.clone().unwrap_or_default(),
            a.location.clone().unwrap_or_default(),
            if a.is_live { "active" } else { "inactive" }.to_string(),
            if a.is_read { "yes" } else { "no" }.to_string(),
            a.created_at.to_rfc3339(),
            a.expires_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            a.message.clone(),
        ]);
    }

    tracing::info!(user_id = user.user_id, rows = alerts.len(), "Alerts exported");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"alerts.csv\"".to_string(),
            ),
        ],
        csv.finish(),
    ))
}
