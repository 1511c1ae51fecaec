//! Biosecurity assessment model and DTOs.

use biosecure_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `biosecurity_assessments` table.
///
/// `assessment_data` holds `{responses, categories}`. `risk_score` is `None`
/// only while the assessment is a draft.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assessment {
    pub id: DbId,
    pub farm_id: DbId,
    pub assessor_id: DbId,
    pub status: String,
    pub assessment_data: serde_json::Value,
    pub risk_score: Option<i32>,
    pub recommendations: Option<String>,
    pub reviewer_id: Option<DbId>,
    pub review_notes: Option<String>,
    pub completed_at: Option<Timestamp>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a scored, completed assessment in one step.
pub struct CreateCompletedAssessment {
    pub farm_id: DbId,
    pub assessor_id: DbId,
    pub assessment_data: serde_json::Value,
    pub risk_score: i32,
    pub recommendations: Option<String>,
}

/// DTO for inserting a draft.
pub struct CreateDraftAssessment {
    pub farm_id: DbId,
    pub assessor_id: DbId,
    pub assessment_data: serde_json::Value,
    pub recommendations: Option<String>,
}

/// DTO for moving a draft to `completed`.
pub struct SubmitDraft {
    pub assessment_data: serde_json::Value,
    pub risk_score: i32,
    pub recommendations: Option<String>,
}
