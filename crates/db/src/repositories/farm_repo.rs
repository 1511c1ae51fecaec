//! Repository for the `farms` table.

use biosecure_core::types::DbId;
use sqlx::PgPool;

use crate::models::farm::{CreateFarm, Farm, UpdateFarm};

const COLUMNS: &str = "id, owner_id, name, farm_type, location, animal_count, \
                        registration_number, size_hectares, created_at, updated_at";

/// Provides CRUD operations for farms.
pub struct FarmRepo;

impl FarmRepo {
    /// Insert a farm owned by `owner_id`.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateFarm,
    ) -> Result<Farm, sqlx::Error> {
        let query = format!(
            "INSERT INTO farms (owner_id, name, farm_type, location, animal_count, \
                                registration_number, size_hectares)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Farm>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.farm_type)
            .bind(&input.location)
            .bind(input.animal_count)
            .bind(&input.registration_number)
            .bind(input.size_hectares)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Farm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM farms WHERE id = $1");
        sqlx::query_as::<_, Farm>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List farms owned by a user, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Farm>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM farms WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Farm>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List every farm, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Farm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM farms ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Farm>(&query).fetch_all(pool).await
    }

    /// Farms on which `assessor_id` has written at least one assessment.
    pub async fn list_assessed_by(
        pool: &PgPool,
        assessor_id: DbId,
    ) -> Result<Vec<Farm>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM farms
             WHERE id IN (SELECT farm_id FROM biosecurity_assessments WHERE assessor_id = $1)
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, Farm>(&query)
            .bind(assessor_id)
            .fetch_all(pool)
            .await
    }

    /// Update a farm. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFarm,
    ) -> Result<Option<Farm>, sqlx::Error> {
        let query = format!(
            "UPDATE farms SET
                name = COALESCE($2, name),
                farm_type = COALESCE($3, farm_type),
                location = COALESCE($4, location),
                animal_count = COALESCE($5, animal_count),
                registration_number = COALESCE($6, registration_number),
                size_hectares = COALESCE($7, size_hectares)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Farm>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.farm_type)
            .bind(&input.location)
            .bind(input.animal_count)
            .bind(&input.registration_number)
            .bind(input.size_hectares)
            .fetch_optional(pool)
            .await
    }
}
