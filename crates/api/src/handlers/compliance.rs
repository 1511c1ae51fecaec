//! Handlers for farm compliance checklists and records.

use axum::extract::{Path, State};
use axum::Json;
use biosecure_core::compliance::{
    build_report, checklist_for, validate_checklist_item, validate_notes, ComplianceReport,
    RecordedItem,
};
use biosecure_core::farm::FarmType;
use biosecure_core::policy::FarmAction;
use biosecure_core::types::DbId;
use biosecure_db::models::compliance::{ComplianceRecord, UpsertComplianceRecord};
use biosecure_db::repositories::ComplianceRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::farm::{authorize_farm, parse_farm_type, stored_farm_type};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// The fixed checklist for one farm type.
#[derive(Debug, Serialize)]
pub struct ChecklistView {
    pub farm_type: FarmType,
    pub items: &'static [&'static str],
}

/// Request body for `PUT /farms/{id}/compliance`.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordComplianceRequest {
    pub checklist_item: String,
    pub is_compliant: bool,
    pub notes: Option<String>,
    #[validate(url(message = "evidence_url must be a valid URL"))]
    pub evidence_url: Option<String>,
}

/// GET /api/v1/compliance/checklists/{farm_type}
pub async fn get_checklist(
    _user: AuthUser,
    Path(farm_type): Path<String>,
) -> AppResult<Json<DataResponse<ChecklistView>>> {
    let farm_type = parse_farm_type(&farm_type)?;
    Ok(Json(DataResponse {
        data: ChecklistView {
            farm_type,
            items: checklist_for(farm_type),
        },
    }))
}

/// GET /api/v1/farms/{id}/compliance
///
/// Every checklist item for the farm's type with its current status, plus
/// the summary counts, rate and tier.
pub async fn get_report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(farm_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ComplianceReport>>> {
    let farm = authorize_farm(&state, &user, farm_id, FarmAction::View).await?;
    let farm_type = stored_farm_type(&farm)?;

    let records = ComplianceRepo::list_by_farm(&state.pool, farm_id).await?;
    let recorded: Vec<RecordedItem> = records.iter().map(RecordedItem::from).collect();

    Ok(Json(DataResponse {
        data: build_report(farm_type, &recorded),
    }))
}

/// PUT /api/v1/farms/{id}/compliance
///
/// Record the current state of one checklist item. Re-recording overwrites.
pub async fn record_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(farm_id): Path<DbId>,
    Json(input): Json<RecordComplianceRequest>,
) -> AppResult<Json<DataResponse<ComplianceRecord>>> {
    let farm = authorize_farm(&state, &user, farm_id, FarmAction::RecordCompliance).await?;
    input.validate()?;

    let farm_type = stored_farm_type(&farm)?;
    validate_checklist_item(farm_type, &input.checklist_item).map_err(AppError::validation)?;
    validate_notes(input.notes.as_deref()).map_err(AppError::validation)?;

    let record = ComplianceRepo::upsert(
        &state.pool,
        &UpsertComplianceRecord {
            farm_id,
            checklist_item: input.checklist_item,
            is_compliant: input.is_compliant,
            notes: input.notes,
            evidence_url: input.evidence_url,
            checked_by: user.user_id,
        },
    )
    .await?;

    tracing::info!(
        farm_id,
        user_id = user.user_id,
        item = %record.checklist_item,
        is_compliant = record.is_compliant,
        "Compliance item recorded"
    );
    Ok(Json(DataResponse { data: record }))
}
