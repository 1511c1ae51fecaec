//! Repository for the `profiles` table.

use biosecure_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, Profile, UpdateProfile};

const COLUMNS: &str = "id, user_id, first_name, last_name, phone, organization, location, \
                        created_at, updated_at";

/// Provides CRUD operations for user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert the profile row created at signup.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, first_name, last_name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(input.user_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's profile, creating it if absent. Only non-`None`
    /// fields in `input` are applied.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, first_name, last_name, phone, organization, location)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id) DO UPDATE SET
                first_name = COALESCE(EXCLUDED.first_name, profiles.first_name),
                last_name = COALESCE(EXCLUDED.last_name, profiles.last_name),
                phone = COALESCE(EXCLUDED.phone, profiles.phone),
                organization = COALESCE(EXCLUDED.organization, profiles.organization),
                location = COALESCE(EXCLUDED.location, profiles.location)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .bind(&input.organization)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }
}
