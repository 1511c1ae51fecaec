//! Permission-gated extractors.
//!
//! Each wrapper authenticates via [`AuthUser`] and then asks
//! [`role_permits`] for one [`Permission`]. Failing the check is a 403.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use biosecure_core::error::CoreError;
use biosecure_core::policy::{role_permits, Permission};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Check one [`Permission`] for an already authenticated caller.
pub fn ensure_permitted(user: &AuthUser, permission: Permission) -> Result<(), AppError> {
    if role_permits(user.role, permission) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(format!(
            "Requires the {} permission",
            permission.name()
        ))))
    }
}

async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    permission: Permission,
    message: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !role_permits(user.role, permission) {
        return Err(AppError::Core(CoreError::Forbidden(message.to_string())));
    }
    Ok(user)
}

/// Requires [`Permission::ManageTraining`] (extension workers, regulators).
///
/// ```ignore
/// async fn create(RequireTrainingManager(user): RequireTrainingManager) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireTrainingManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireTrainingManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authorize(
            parts,
            state,
            Permission::ManageTraining,
            "Training management requires an extension worker or regulator role",
        )
        .await?;
        Ok(RequireTrainingManager(user))
    }
}

/// Requires [`Permission::BroadcastAlerts`] (regulators).
pub struct RequireAlertBroadcaster(pub AuthUser);

impl FromRequestParts<AppState> for RequireAlertBroadcaster {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authorize(
            parts,
            state,
            Permission::BroadcastAlerts,
            "Broadcasting alerts requires the regulator role",
        )
        .await?;
        Ok(RequireAlertBroadcaster(user))
    }
}

/// Requires [`Permission::ReviewAssessments`] (veterinarians, regulators).
pub struct RequireReviewer(pub AuthUser);

impl FromRequestParts<AppState> for RequireReviewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authorize(
            parts,
            state,
            Permission::ReviewAssessments,
            "Reviewing assessments requires a veterinarian or regulator role",
        )
        .await?;
        Ok(RequireReviewer(user))
    }
}
