//! Repository for the `training_modules` table.

use biosecure_core::types::DbId;
use sqlx::PgPool;

use crate::models::training::{
    CreateTrainingModule, ModuleWithProgress, TrainingModule, UpdateTrainingModule,
};

const COLUMNS: &str = "id, title, description, content, duration_minutes, farm_type, \
                        is_published, created_by, created_at, updated_at";

/// Provides CRUD operations for training modules.
pub struct TrainingModuleRepo;

impl TrainingModuleRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTrainingModule,
    ) -> Result<TrainingModule, sqlx::Error> {
        let query = format!(
            "INSERT INTO training_modules
                (title, description, content, duration_minutes, farm_type, is_published, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingModule>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(input.duration_minutes)
            .bind(&input.farm_type)
            .bind(input.is_published)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TrainingModule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM training_modules WHERE id = $1");
        sqlx::query_as::<_, TrainingModule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every module, published or not, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<TrainingModule>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM training_modules ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, TrainingModule>(&query)
            .fetch_all(pool)
            .await
    }

    /// Published modules joined with `user_id`'s progress, newest first.
    ///
    /// With `farm_type` set, only modules for that type or with no type are
    /// returned.
    pub async fn list_published_with_progress(
        pool: &PgPool,
        user_id: DbId,
        farm_type: Option<&str>,
    ) -> Result<Vec<ModuleWithProgress>, sqlx::Error> {
        sqlx::query_as::<_, ModuleWithProgress>(
            "SELECT m.id, m.title, m.description, m.duration_minutes, m.farm_type, m.created_at,
                    COALESCE(p.progress_pct, 0) AS progress_pct,
                    COALESCE(p.completed, false) AS completed
             FROM training_modules m
             LEFT JOIN user_training_progress p
                ON p.module_id = m.id AND p.user_id = $1
             WHERE m.is_published = true
               AND ($2::TEXT IS NULL OR m.farm_type IS NULL OR m.farm_type = $2)
             ORDER BY m.created_at DESC, m.id DESC",
        )
        .bind(user_id)
        .bind(farm_type)
        .fetch_all(pool)
        .await
    }

    /// Update a module. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrainingModule,
    ) -> Result<Option<TrainingModule>, sqlx::Error> {
        let query = format!(
            "UPDATE training_modules SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                content = COALESCE($4, content),
                duration_minutes = COALESCE($5, duration_minutes),
                farm_type = COALESCE($6, farm_type),
                is_published = COALESCE($7, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingModule>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(input.duration_minutes)
            .bind(&input.farm_type)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }
}
