//! Repository for the `user_preferences` table.

use biosecure_core::types::DbId;
use sqlx::PgPool;

use crate::models::preferences::{SavePreferences, UserPreferences};

const COLUMNS: &str = "id, user_id, locale, theme, created_at, updated_at";

/// Provides read and upsert operations for per-user preferences.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Find a user's preferences. Returns `None` if none were saved yet.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserPreferences>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_preferences WHERE user_id = $1");
        sqlx::query_as::<_, UserPreferences>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Upsert preferences. A `None` field keeps the stored value, or the
    /// column default on first insert.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &SavePreferences,
    ) -> Result<UserPreferences, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_preferences (user_id, locale, theme)
             VALUES ($1, COALESCE($2, 'en'), COALESCE($3, 'system'))
             ON CONFLICT (user_id) DO UPDATE SET
                locale = COALESCE($2, user_preferences.locale),
                theme = COALESCE($3, user_preferences.theme)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserPreferences>(&query)
            .bind(user_id)
            .bind(&input.locale)
            .bind(&input.theme)
            .fetch_one(pool)
            .await
    }
}
