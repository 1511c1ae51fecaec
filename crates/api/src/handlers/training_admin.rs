//! Module authoring for training managers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use biosecure_core::error::CoreError;
use biosecure_core::training::{initial_content, validate_duration, MAX_TITLE_LENGTH};
use biosecure_core::types::DbId;
use biosecure_db::models::training::{CreateTrainingModule, TrainingModule, UpdateTrainingModule};
use biosecure_db::repositories::TrainingModuleRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::farm::parse_farm_type;
use crate::middleware::rbac::RequireTrainingManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/training/modules`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateModuleRequest {
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Module body. Blank text gets a starter outline.
    pub content_text: Option<String>,
    pub duration_minutes: i32,
    pub farm_type: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// Request body for `PUT /admin/training/modules/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateModuleRequest {
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub content_text: Option<String>,
    pub duration_minutes: Option<i32>,
    pub farm_type: Option<String>,
    pub is_published: Option<bool>,
}

fn validate_title(title: &str) -> AppResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("title must not be empty"));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// GET /api/v1/admin/training/modules
///
/// Every module, published or not, newest first.
pub async fn list_all_modules(
    State(state): State<AppState>,
    RequireTrainingManager(_user): RequireTrainingManager,
) -> AppResult<Json<DataResponse<Vec<TrainingModule>>>> {
    let modules = TrainingModuleRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: modules }))
}

/// POST /api/v1/admin/training/modules
pub async fn create_module(
    State(state): State<AppState>,
    RequireTrainingManager(user): RequireTrainingManager,
    Json(input): Json<CreateModuleRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<TrainingModule>>)> {
    input.validate()?;
    let title = validate_title(&input.title)?;
    validate_duration(input.duration_minutes).map_err(AppError::validation)?;
    let farm_type = input
        .farm_type
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(parse_farm_type)
        .transpose()?;

    let create = CreateTrainingModule {
        title,
        description: input.description,
        content: initial_content(input.content_text.as_deref(), farm_type),
        duration_minutes: input.duration_minutes,
        farm_type: farm_type.map(|ft| ft.as_str().to_string()),
        is_published: input.is_published,
        created_by: user.user_id,
    };
    let module = TrainingModuleRepo::create(&state.pool, &create).await?;

    tracing::info!(
        module_id = module.id,
        created_by = user.user_id,
        published = module.is_published,
        "Training module created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: module })))
}

/// PUT /api/v1/admin/training/modules/{id}
pub async fn update_module(
    State(state): State<AppState>,
    RequireTrainingManager(user): RequireTrainingManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateModuleRequest>,
) -> AppResult<Json<DataResponse<TrainingModule>>> {
    input.validate()?;
    let title = input.title.as_deref().map(validate_title).transpose()?;
    if let Some(minutes) = input.duration_minutes {
        validate_duration(minutes).map_err(AppError::validation)?;
    }
    let farm_type = input
        .farm_type
        .as_deref()
        .map(parse_farm_type)
        .transpose()?
        .map(|ft| ft.as_str().to_string());

    let update = UpdateTrainingModule {
        title,
        description: input.description,
        content: input
            .content_text
            .map(|text| serde_json::json!({ "text": text })),
        duration_minutes: input.duration_minutes,
        farm_type,
        is_published: input.is_published,
    };
    let module = TrainingModuleRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Training module",
            id,
        }))?;

    tracing::info!(module_id = id, updated_by = user.user_id, "Training module updated");
    Ok(Json(DataResponse { data: module }))
}
