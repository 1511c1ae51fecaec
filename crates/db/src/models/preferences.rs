//! Per-user locale and theme preferences.

use biosecure_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `user_preferences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPreferences {
    pub id: DbId,
    pub user_id: DbId,
    pub locale: String,
    pub theme: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting preferences. Missing fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavePreferences {
    pub locale: Option<String>,
    pub theme: Option<String>,
}
