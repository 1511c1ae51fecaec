//! Repository for the `user_training_progress` table.
//!
//! Every write is a single upsert keyed by `(user_id, module_id)`; there is
//! no check-then-insert path.

use biosecure_core::training::completed_after_update;
use biosecure_core::types::DbId;
use sqlx::PgPool;

use crate::models::training::{ProgressSummary, TrainingProgress};

const COLUMNS: &str = "id, user_id, module_id, progress_pct, completed, completed_at, \
                        created_at, updated_at";

/// Provides progress bookkeeping for learners.
pub struct TrainingProgressRepo;

impl TrainingProgressRepo {
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        module_id: DbId,
    ) -> Result<Option<TrainingProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_training_progress WHERE user_id = $1 AND module_id = $2"
        );
        sqlx::query_as::<_, TrainingProgress>(&query)
            .bind(user_id)
            .bind(module_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a zero-progress row if none exists, then return the row.
    ///
    /// Starting twice is a no-op; existing progress is never reset.
    pub async fn start(
        pool: &PgPool,
        user_id: DbId,
        module_id: DbId,
    ) -> Result<TrainingProgress, sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_training_progress (user_id, module_id, progress_pct, completed)
             VALUES ($1, $2, 0, false)
             ON CONFLICT (user_id, module_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(module_id)
        .execute(pool)
        .await?;

        Self::find(pool, user_id, module_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Set progress to an already clamped percentage.
    ///
    /// Reaching 100 marks the module complete; a lower value keeps the
    /// stored completed flag.
    pub async fn set_progress(
        pool: &PgPool,
        user_id: DbId,
        module_id: DbId,
        progress_pct: i32,
    ) -> Result<TrainingProgress, sqlx::Error> {
        // For a fresh row there is no stored flag to keep.
        let completed_if_new = completed_after_update(progress_pct, false);
        let query = format!(
            "INSERT INTO user_training_progress
                (user_id, module_id, progress_pct, completed, completed_at)
             VALUES ($1, $2, $3, $4, CASE WHEN $4 THEN NOW() END)
             ON CONFLICT (user_id, module_id) DO UPDATE SET
                progress_pct = EXCLUDED.progress_pct,
                completed = user_training_progress.completed OR EXCLUDED.completed,
                completed_at = CASE
                    WHEN user_training_progress.completed THEN user_training_progress.completed_at
                    WHEN EXCLUDED.completed THEN NOW()
                    ELSE NULL
                END
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingProgress>(&query)
            .bind(user_id)
            .bind(module_id)
            .bind(progress_pct)
            .bind(completed_if_new)
            .fetch_one(pool)
            .await
    }

    /// Mark a module complete: 100 % and `completed = true`.
    pub async fn complete(
        pool: &PgPool,
        user_id: DbId,
        module_id: DbId,
    ) -> Result<TrainingProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_training_progress
                (user_id, module_id, progress_pct, completed, completed_at)
             VALUES ($1, $2, 100, true, NOW())
             ON CONFLICT (user_id, module_id) DO UPDATE SET
                progress_pct = 100,
                completed = true,
                completed_at = COALESCE(user_training_progress.completed_at, NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingProgress>(&query)
            .bind(user_id)
            .bind(module_id)
            .fetch_one(pool)
            .await
    }

    /// Count of modules the user started and completed.
    pub async fn summary_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<ProgressSummary, sqlx::Error> {
        sqlx::query_as::<_, ProgressSummary>(
            "SELECT COUNT(*) AS started,
                    COUNT(*) FILTER (WHERE completed) AS completed
             FROM user_training_progress
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
