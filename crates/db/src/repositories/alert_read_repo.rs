//! Repository for the `user_alerts` read-receipt table.

use biosecure_core::types::DbId;
use sqlx::PgPool;

/// Records which alerts a user has read.
pub struct AlertReadRepo;

impl AlertReadRepo {
    /// Mark one alert read. Re-reading keeps the first `read_at`.
    pub async fn mark_read(
        pool: &PgPool,
        user_id: DbId,
        alert_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_alerts (user_id, alert_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id, alert_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(alert_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark many alerts read in one statement. Returns the number of new receipts.
    pub async fn mark_many_read(
        pool: &PgPool,
        user_id: DbId,
        alert_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if alert_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO user_alerts (user_id, alert_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT (user_id, alert_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(alert_ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
