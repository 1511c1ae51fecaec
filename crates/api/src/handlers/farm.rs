//! Handlers for the `/farms` resource.
//!
//! Also hosts [`authorize_farm`], which every farm-scoped handler uses to
//! load a farm and check the caller against the farm policy.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use biosecure_core::error::CoreError;
use biosecure_core::farm::{validate_animal_count, validate_size_hectares, FarmType};
use biosecure_core::policy::{can_act_on_farm, role_permits, FarmAction, Permission};
use biosecure_core::types::DbId;
use biosecure_db::models::farm::{CreateFarm, Farm, UpdateFarm};
use biosecure_db::repositories::FarmRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{FarmListParams, FarmScope};
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_NAME_LENGTH: usize = 200;
const MAX_LOCATION_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load a farm and require `action` on it.
///
/// A caller who may not even view the farm gets 404, as if the row did not
/// exist. A viewer lacking `action` gets 403.
pub(crate) async fn authorize_farm(
    state: &AppState,
    user: &AuthUser,
    farm_id: DbId,
    action: FarmAction,
) -> AppResult<Farm> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Farm",
            id: farm_id,
        })
    };
    let farm = FarmRepo::find_by_id(&state.pool, farm_id)
        .await?
        .ok_or_else(not_found)?;

    let is_owner = farm.owner_id == user.user_id;
    if !can_act_on_farm(user.role, is_owner, FarmAction::View) {
        return Err(not_found());
    }
    if !can_act_on_farm(user.role, is_owner, action) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Your role may not perform this action on farm {farm_id}"
        ))));
    }
    Ok(farm)
}

/// Parse a client-supplied farm type into a 400 on failure.
pub(crate) fn parse_farm_type(value: &str) -> AppResult<FarmType> {
    FarmType::from_str_value(value.trim()).map_err(AppError::validation)
}

/// Parse a farm type read back from the database.
pub(crate) fn stored_farm_type(farm: &Farm) -> AppResult<FarmType> {
    FarmType::from_str_value(&farm.farm_type).map_err(AppError::InternalError)
}

fn validate_text(field: &str, value: &str, max: usize) -> AppResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > max {
        return Err(AppError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/farms?scope=mine|all
pub async fn list_farms(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<FarmListParams>,
) -> AppResult<Json<DataResponse<Vec<Farm>>>> {
    let farms = match params.scope {
        FarmScope::Mine => FarmRepo::list_by_owner(&state.pool, user.user_id).await?,
        FarmScope::All => {
            if !role_permits(user.role, Permission::ViewAllFarms) {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Listing all farms is not available to your role".into(),
                )));
            }
            FarmRepo::list_all(&state.pool).await?
        }
    };
    Ok(Json(DataResponse { data: farms }))
}

/// POST /api/v1/farms
///
/// Any authenticated user may register a farm and becomes its owner.
pub async fn create_farm(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateFarm>,
) -> AppResult<(StatusCode, Json<DataResponse<Farm>>)> {
    validate_text("name", &input.name, MAX_NAME_LENGTH)?;
    validate_text("location", &input.location, MAX_LOCATION_LENGTH)?;
    let farm_type = parse_farm_type(&input.farm_type)?;
    validate_animal_count(input.animal_count).map_err(AppError::validation)?;
    validate_size_hectares(input.size_hectares).map_err(AppError::validation)?;

    let input = CreateFarm {
        name: input.name.trim().to_string(),
        farm_type: farm_type.as_str().to_string(),
        location: input.location.trim().to_string(),
        ..input
    };
    let farm = FarmRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(
        farm_id = farm.id,
        owner_id = user.user_id,
        farm_type = %farm.farm_type,
        "Farm registered"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: farm })))
}

/// GET /api/v1/farms/{id}
pub async fn get_farm(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Farm>>> {
    let farm = authorize_farm(&state, &user, id, FarmAction::View).await?;
    Ok(Json(DataResponse { data: farm }))
}

/// PUT /api/v1/farms/{id}
///
/// Owner only. Omitted fields are left unchanged.
pub async fn update_farm(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFarm>,
) -> AppResult<Json<DataResponse<Farm>>> {
    authorize_farm(&state, &user, id, FarmAction::Edit).await?;

    if let Some(name) = input.name.as_deref() {
        validate_text("name", name, MAX_NAME_LENGTH)?;
    }
    if let Some(location) = input.location.as_deref() {
        validate_text("location", location, MAX_LOCATION_LENGTH)?;
    }
    let farm_type = input.farm_type.as_deref().map(parse_farm_type).transpose()?;
    validate_animal_count(input.animal_count).map_err(AppError::validation)?;
    validate_size_hectares(input.size_hectares).map_err(AppError::validation)?;

    let input = UpdateFarm {
        name: input.name.map(|n| n.trim().to_string()),
        location: input.location.map(|l| l.trim().to_string()),
        farm_type: farm_type.map(|ft| ft.as_str().to_string()),
        ..input
    };
    let farm = FarmRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Farm",
            id,
        }))?;

    tracing::info!(farm_id = id, user_id = user.user_id, "Farm updated");
    Ok(Json(DataResponse { data: farm }))
}
