//! Repository for the `compliance_records` table.

use biosecure_core::types::DbId;
use sqlx::PgPool;

use crate::models::compliance::{ComplianceRecord, UpsertComplianceRecord};

const COLUMNS: &str = "id, farm_id, checklist_item, is_compliant, notes, evidence_url, \
                        checked_by, checked_at, created_at, updated_at";

/// Provides upsert and read operations for compliance records.
pub struct ComplianceRepo;

impl ComplianceRepo {
    /// Record the current state of one checklist item.
    ///
    /// Uses `ON CONFLICT (farm_id, checklist_item) DO UPDATE` so each farm
    /// holds at most one row per item.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertComplianceRecord,
    ) -> Result<ComplianceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO compliance_records
                (farm_id, checklist_item, is_compliant, notes, evidence_url, checked_by, checked_at)
             VALUES ($1, $2, $3, $4, $5, $6, NOW())
             ON CONFLICT (farm_id, checklist_item) DO UPDATE SET
                is_compliant = EXCLUDED.is_compliant,
                notes = EXCLUDED.notes,
                evidence_url = EXCLUDED.evidence_url,
                checked_by = EXCLUDED.checked_by,
                checked_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ComplianceRecord>(&query)
            .bind(input.farm_id)
            .bind(&input.checklist_item)
            .bind(input.is_compliant)
            .bind(&input.notes)
            .bind(&input.evidence_url)
            .bind(input.checked_by)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_farm(
        pool: &PgPool,
        farm_id: DbId,
    ) -> Result<Vec<ComplianceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM compliance_records
             WHERE farm_id = $1
             ORDER BY checklist_item ASC"
        );
        sqlx::query_as::<_, ComplianceRecord>(&query)
            .bind(farm_id)
            .fetch_all(pool)
            .await
    }
}
