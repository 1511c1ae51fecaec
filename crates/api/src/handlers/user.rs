//! Handlers for the caller's own profile and display preferences.

use axum::extract::State;
use axum::Json;
use biosecure_core::error::CoreError;
use biosecure_core::preferences::{validate_locale, Theme, DEFAULT_LOCALE};
use biosecure_db::models::preferences::SavePreferences;
use biosecure_db::models::profile::{Profile, UpdateProfile};
use biosecure_db::repositories::{PreferenceRepo, ProfileRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /user/profile`. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub organization: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
}

/// The caller's locale and theme. Defaults apply before the first save.
#[derive(Debug, Serialize)]
pub struct PreferencesView {
    pub locale: String,
    pub theme: Theme,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// GET /api/v1/user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ProfileRepo::find_by_user(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<Profile>>> {
    input.validate()?;

    let update = UpdateProfile {
        first_name: input.first_name,
        last_name: input.last_name,
        phone: input.phone,
        organization: input.organization,
        location: input.location,
    };
    let profile = ProfileRepo::upsert(&state.pool, user.user_id, &update).await?;

    tracing::info!(user_id = user.user_id, "Profile updated");
    Ok(Json(DataResponse { data: profile }))
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// GET /api/v1/user/preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<PreferencesView>>> {
    let view = match PreferenceRepo::find_by_user(&state.pool, user.user_id).await? {
        Some(row) => PreferencesView {
            locale: row.locale,
            // A stored value that no longer parses falls back to the default.
            theme: Theme::from_str_value(&row.theme).unwrap_or_default(),
        },
        None => PreferencesView {
            locale: DEFAULT_LOCALE.to_string(),
            theme: Theme::default(),
        },
    };
    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/user/preferences
///
/// Upserts the caller's row. Omitted fields keep their stored value.
pub async fn update_preferences(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SavePreferences>,
) -> AppResult<Json<DataResponse<PreferencesView>>> {
    if let Some(locale) = input.locale.as_deref() {
        validate_locale(locale).map_err(AppError::validation)?;
    }
    let theme = input
        .theme
        .as_deref()
        .map(Theme::from_str_value)
        .transpose()
        .map_err(AppError::validation)?;

    let saved = PreferenceRepo::upsert(
        &state.pool,
        user.user_id,
        &SavePreferences {
            locale: input.locale,
            theme: theme.map(|t| t.as_str().to_string()),
        },
    )
    .await?;

    tracing::info!(
        user_id = user.user_id,
        locale = %saved.locale,
        theme = %saved.theme,
        "Preferences saved"
    );

    Ok(Json(DataResponse {
        data: PreferencesView {
            locale: saved.locale,
            theme: Theme::from_str_value(&saved.theme).unwrap_or_default(),
        },
    }))
}
