//! Farm entity model and DTOs.

use biosecure_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `farms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Farm {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub farm_type: String,
    pub location: String,
    pub animal_count: Option<i32>,
    pub registration_number: Option<String>,
    pub size_hectares: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a farm. The owner comes from the request identity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFarm {
    pub name: String,
    pub farm_type: String,
    pub location: String,
    pub animal_count: Option<i32>,
    pub registration_number: Option<String>,
    pub size_hectares: Option<f64>,
}

/// DTO for updating a farm. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFarm {
    pub name: Option<String>,
    pub farm_type: Option<String>,
    pub location: Option<String>,
    pub animal_count: Option<i32>,
    pub registration_number: Option<String>,
    pub size_hectares: Option<f64>,
}
