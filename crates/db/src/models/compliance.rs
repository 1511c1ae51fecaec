//! Compliance record model and DTOs.

use biosecure_core::compliance::RecordedItem;
use biosecure_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `compliance_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ComplianceRecord {
    pub id: DbId,
    pub farm_id: DbId,
    pub checklist_item: String,
    pub is_compliant: bool,
    pub notes: Option<String>,
    pub evidence_url: Option<String>,
    pub checked_by: Option<DbId>,
    pub checked_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&ComplianceRecord> for RecordedItem {
    fn from(r: &ComplianceRecord) -> Self {
        RecordedItem {
            checklist_item: r.checklist_item.clone(),
            is_compliant: r.is_compliant,
            notes: r.notes.clone(),
            checked_at: r.checked_at,
        }
    }
}

/// DTO for upserting the current state of one checklist item.
pub struct UpsertComplianceRecord {
    pub farm_id: DbId,
    pub checklist_item: String,
    pub is_compliant: bool,
    pub notes: Option<String>,
    pub evidence_url: Option<String>,
    pub checked_by: DbId,
}
