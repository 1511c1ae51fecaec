//! Profile entity model and DTOs.

use biosecure_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `profiles` table. One per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub location: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating the profile at signup.
#[derive(Debug, Deserialize)]
pub struct CreateProfile {
    pub user_id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// DTO for updating a profile. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub location: Option<String>,
}
