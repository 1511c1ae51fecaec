//! Learner-facing training catalog and progress handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use biosecure_core::error::CoreError;
use biosecure_core::policy::{role_permits, Permission};
use biosecure_core::training::{clamp_progress, filter_and_sort, is_consistent, ProgressView};
use biosecure_core::types::DbId;
use biosecure_db::models::training::{ModuleWithProgress, TrainingModule, TrainingProgress};
use biosecure_db::repositories::{TrainingModuleRepo, TrainingProgressRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::farm::parse_farm_type;
use crate::middleware::auth::AuthUser;
use crate::query::TrainingListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /training/modules/{id}/progress`.
///
/// Any number is accepted; it is rounded and clamped to 0-100.
#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub progress_pct: f64,
}

/// One catalog entry with the caller's progress.
#[derive(Debug, Serialize)]
pub struct CatalogItem {
    #[serde(flatten)]
    pub module: ModuleWithProgress,
    /// False when the row is marked completed below 100 %.
    pub consistent: bool,
}

/// A full module with the caller's progress.
#[derive(Debug, Serialize)]
pub struct ModuleDetail {
    #[serde(flatten)]
    pub module: TrainingModule,
    pub progress: ProgressView,
}

/// A stored progress row with its consistency flag.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    #[serde(flatten)]
    pub progress: TrainingProgress,
    pub consistent: bool,
}

impl From<TrainingProgress> for ProgressResponse {
    fn from(progress: TrainingProgress) -> Self {
        let consistent = is_consistent(progress.progress_pct, progress.completed);
        Self {
            progress,
            consistent,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a module the caller may read. Unpublished modules are visible only
/// to training managers.
async fn find_visible_module(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<TrainingModule> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Training module",
            id,
        })
    };
    let module = TrainingModuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    if !module.is_published && !role_permits(user.role, Permission::ManageTraining) {
        return Err(not_found());
    }
    Ok(module)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/training/modules?farm_type=&q=&status=&sort=
pub async fn list_modules(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<TrainingListParams>,
) -> AppResult<Json<DataResponse<Vec<CatalogItem>>>> {
    let farm_type = params
        .farm_type
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(parse_farm_type)
        .transpose()?;

    let modules = TrainingModuleRepo::list_published_with_progress(
        &state.pool,
        user.user_id,
        farm_type.map(|ft| ft.as_str()),
    )
    .await?;

    let items = filter_and_sort(modules, params.q.as_deref(), params.status, params.sort)
        .into_iter()
        .map(|module| CatalogItem {
            consistent: is_consistent(module.progress_pct, module.completed),
            module,
        })
        .collect();

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/training/modules/{id}
pub async fn get_module(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ModuleDetail>>> {
    let module = find_visible_module(&state, &user, id).await?;
    let progress = TrainingProgressRepo::find(&state.pool, user.user_id, id)
        .await?
        .map_or_else(ProgressView::not_started, |p| {
            ProgressView::new(p.progress_pct, p.completed)
        });

    Ok(Json(DataResponse {
        data: ModuleDetail { module, progress },
    }))
}

/// POST /api/v1/training/modules/{id}/start
///
/// Idempotent: starting again returns the existing row unchanged.
pub async fn start_module(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProgressResponse>>> {
    find_visible_module(&state, &user, id).await?;
    let progress = TrainingProgressRepo::start(&state.pool, user.user_id, id).await?;

    tracing::info!(module_id = id, user_id = user.user_id, "Training module started");
    Ok(Json(DataResponse {
        data: progress.into(),
    }))
}

/// PUT /api/v1/training/modules/{id}/progress
pub async fn update_progress(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ProgressRequest>,
) -> AppResult<Json<DataResponse<ProgressResponse>>> {
    find_visible_module(&state, &user, id).await?;
    let pct = clamp_progress(input.progress_pct);
    let progress = TrainingProgressRepo::set_progress(&state.pool, user.user_id, id, pct).await?;

    tracing::info!(
        module_id = id,
        user_id = user.user_id,
        progress_pct = pct,
        completed = progress.completed,
        "Training progress updated"
    );
    Ok(Json(DataResponse {
        data: progress.into(),
    }))
}

/// POST /api/v1/training/modules/{id}/complete
pub async fn complete_module(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProgressResponse>>> {
    find_visible_module(&state, &user, id).await?;
    let progress = TrainingProgressRepo::complete(&state.pool, user.user_id, id).await?;

    tracing::info!(module_id = id, user_id = user.user_id, "Training module completed");
    Ok(Json(DataResponse {
        data: progress.into(),
    }))
}
