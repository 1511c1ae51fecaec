//! Repository for the `alerts` table.

use biosecure_core::types::DbId;
use sqlx::PgPool;

use crate::models::alert::{Alert, AlertWithReadState, CreateAlert};

const COLUMNS: &str = "id, title, message, severity, farm_type, location, is_active, \
                        expires_at, created_by, created_at, updated_at";

/// Provides CRUD operations for broadcast alerts.
pub struct AlertRepo;

impl AlertRepo {
    pub async fn create(pool: &PgPool, input: &CreateAlert) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts (title, message, severity, farm_type, location, expires_at, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(&input.title)
            .bind(&input.message)
            .bind(&input.severity)
            .bind(&input.farm_type)
            .bind(&input.location)
            .bind(input.expires_at)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1");
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the most recent alerts regardless of state, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// The most recent alerts with `user_id`'s read receipt, newest first.
    pub async fn list_recent_for_reader(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<AlertWithReadState>, sqlx::Error> {
        sqlx::query_as::<_, AlertWithReadState>(
            "SELECT a.id, a.title, a.message, a.severity, a.farm_type, a.location,
                    a.is_active, a.expires_at, a.created_at, ua.read_at
             FROM alerts a
             LEFT JOIN user_alerts ua ON ua.alert_id = a.id AND ua.user_id = $1
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Turn an alert off. Returns `None` if no row with the given `id` exists.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "UPDATE alerts SET is_active = false WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Number of alerts that are flagged active and not expired.
    pub async fn count_live(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM alerts
             WHERE is_active = true AND (expires_at IS NULL OR expires_at > NOW())",
        )
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
