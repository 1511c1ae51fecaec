//! Repository for the `biosecurity_assessments` table.
//!
//! Status changes are compare-and-set: each transition updates only rows
//! still in the expected source status, so a lost race returns `None`
//! instead of overwriting.

use biosecure_core::assessment::{STATUS_COMPLETED, STATUS_DRAFT, STATUS_REVIEWED};
use biosecure_core::types::DbId;
use sqlx::PgPool;

use crate::models::assessment::{
    Assessment, CreateCompletedAssessment, CreateDraftAssessment, SubmitDraft,
};

const COLUMNS: &str = "id, farm_id, assessor_id, status, assessment_data, risk_score, \
                        recommendations, reviewer_id, review_notes, completed_at, reviewed_at, \
                        created_at, updated_at";

/// Provides CRUD and status-transition operations for assessments.
pub struct AssessmentRepo;

impl AssessmentRepo {
    /// Insert a scored assessment directly in `completed` status.
    pub async fn create_completed(
        pool: &PgPool,
        input: &CreateCompletedAssessment,
    ) -> Result<Assessment, sqlx::Error> {
        let query = format!(
            "INSERT INTO biosecurity_assessments
                (farm_id, assessor_id, status, assessment_data, risk_score, recommendations, completed_at)
             VALUES ($1, $2, $3, $4, $5, $6, NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assessment>(&query)
            .bind(input.farm_id)
            .bind(input.assessor_id)
            .bind(STATUS_COMPLETED)
            .bind(&input.assessment_data)
            .bind(input.risk_score)
            .bind(&input.recommendations)
            .fetch_one(pool)
            .await
    }

    /// Insert an unscored draft.
    pub async fn create_draft(
        pool: &PgPool,
        input: &CreateDraftAssessment,
    ) -> Result<Assessment, sqlx::Error> {
        let query = format!(
            "INSERT INTO biosecurity_assessments
                (farm_id, assessor_id, status, assessment_data, recommendations)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assessment>(&query)
            .bind(input.farm_id)
            .bind(input.assessor_id)
            .bind(STATUS_DRAFT)
            .bind(&input.assessment_data)
            .bind(&input.recommendations)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Assessment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM biosecurity_assessments WHERE id = $1");
        sqlx::query_as::<_, Assessment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a farm's assessments, newest first.
    pub async fn list_by_farm(
        pool: &PgPool,
        farm_id: DbId,
    ) -> Result<Vec<Assessment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM biosecurity_assessments
             WHERE farm_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Assessment>(&query)
            .bind(farm_id)
            .fetch_all(pool)
            .await
    }

    /// List assessments written by one assessor, newest first.
    pub async fn list_by_assessor(
        pool: &PgPool,
        assessor_id: DbId,
        limit: i64,
    ) -> Result<Vec<Assessment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM biosecurity_assessments
             WHERE assessor_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Assessment>(&query)
            .bind(assessor_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Replace the responses of a draft. Returns `None` if the row is not a draft.
    pub async fn update_draft(
        pool: &PgPool,
        id: DbId,
        assessment_data: &serde_json::Value,
        recommendations: Option<&str>,
    ) -> Result<Option<Assessment>, sqlx::Error> {
        let query = format!(
            "UPDATE biosecurity_assessments SET
                assessment_data = $2,
                recommendations = COALESCE($3, recommendations)
             WHERE id = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assessment>(&query)
            .bind(id)
            .bind(assessment_data)
            .bind(recommendations)
            .bind(STATUS_DRAFT)
            .fetch_optional(pool)
            .await
    }

    /// `draft -> completed`. Returns `None` if the row is no longer a draft.
    pub async fn submit_draft(
        pool: &PgPool,
        id: DbId,
        input: &SubmitDraft,
    ) -> Result<Option<Assessment>, sqlx::Error> {
        let query = format!(
            "UPDATE biosecurity_assessments SET
                status = $2,
                assessment_data = $3,
                risk_score = $4,
                recommendations = COALESCE($5, recommendations),
                completed_at = NOW()
             WHERE id = $1 AND status = $6
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assessment>(&query)
            .bind(id)
            .bind(STATUS_COMPLETED)
            .bind(&input.assessment_data)
            .bind(input.risk_score)
            .bind(&input.recommendations)
            .bind(STATUS_DRAFT)
            .fetch_optional(pool)
            .await
    }

    /// `completed -> reviewed`. Returns `None` if the row is not `completed`.
    pub async fn mark_reviewed(
        pool: &PgPool,
        id: DbId,
        reviewer_id: DbId,
        review_notes: Option<&str>,
    ) -> Result<Option<Assessment>, sqlx::Error> {
        let query = format!(
            "UPDATE biosecurity_assessments SET
                status = $2,
                reviewer_id = $3,
                review_notes = $4,
                reviewed_at = NOW()
             WHERE id = $1 AND status = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assessment>(&query)
            .bind(id)
            .bind(STATUS_REVIEWED)
            .bind(reviewer_id)
            .bind(review_notes)
            .bind(STATUS_COMPLETED)
            .fetch_optional(pool)
            .await
    }
}
