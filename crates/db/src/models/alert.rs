//! Alert and read-receipt models.

use biosecure_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `alerts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub title: String,
    pub message: String,
    pub severity: String,
    pub farm_type: Option<String>,
    pub location: Option<String>,
    pub is_active: bool,
    pub expires_at: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An alert together with one reader's read receipt.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertWithReadState {
    pub id: DbId,
    pub title: String,
    pub message: String,
    pub severity: String,
    pub farm_type: Option<String>,
    pub location: Option<String>,
    pub is_active: bool,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub read_at: Option<Timestamp>,
}

/// DTO for broadcasting an alert.
pub struct CreateAlert {
    pub title: String,
    pub message: String,
    pub severity: String,
    pub farm_type: Option<String>,
    pub location: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub created_by: DbId,
}
