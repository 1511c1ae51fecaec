//! Cross-table aggregate queries behind the role dashboards.

use biosecure_core::types::DbId;
use sqlx::PgPool;

use crate::models::dashboard::{
    FarmCompliance, FarmTypeCount, FarmTypeRisk, LatestScore, LearnerCounts, ModuleCounts,
    StatusCount,
};

/// Read-only aggregates. Every method is a single query.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Assessment counts per status, optionally limited to one assessor.
    pub async fn assessment_status_counts(
        pool: &PgPool,
        assessor_id: Option<DbId>,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count
             FROM biosecurity_assessments
             WHERE ($1::BIGINT IS NULL OR assessor_id = $1)
             GROUP BY status
             ORDER BY status",
        )
        .bind(assessor_id)
        .fetch_all(pool)
        .await
    }

    /// Latest scored assessment per farm for the given farms.
    pub async fn latest_scores(
        pool: &PgPool,
        farm_ids: &[DbId],
    ) -> Result<Vec<LatestScore>, sqlx::Error> {
        sqlx::query_as::<_, LatestScore>(
            "SELECT DISTINCT ON (farm_id) farm_id, risk_score
             FROM biosecurity_assessments
             WHERE farm_id = ANY($1) AND risk_score IS NOT NULL
             ORDER BY farm_id, completed_at DESC NULLS LAST, id DESC",
        )
        .bind(farm_ids)
        .fetch_all(pool)
        .await
    }

    /// Compliant checklist items per farm. `None` means every farm.
    pub async fn farm_compliance(
        pool: &PgPool,
        farm_ids: Option<&[DbId]>,
    ) -> Result<Vec<FarmCompliance>, sqlx::Error> {
        sqlx::query_as::<_, FarmCompliance>(
            "SELECT f.id AS farm_id, f.farm_type,
                    COALESCE(
                        ARRAY_AGG(c.checklist_item) FILTER (WHERE c.is_compliant),
                        ARRAY[]::TEXT[]
                    ) AS compliant_items
             FROM farms f
             LEFT JOIN compliance_records c ON c.farm_id = f.id
             WHERE ($1::BIGINT[] IS NULL OR f.id = ANY($1))
             GROUP BY f.id, f.farm_type
             ORDER BY f.id",
        )
        .bind(farm_ids)
        .fetch_all(pool)
        .await
    }

    /// Every non-null risk score. Feeds the risk distribution.
    pub async fn scored_risk_scores(pool: &PgPool) -> Result<Vec<i32>, sqlx::Error> {
        let rows: Vec<(i32,)> = sqlx::query_as(
            "SELECT risk_score FROM biosecurity_assessments WHERE risk_score IS NOT NULL",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(s,)| s).collect())
    }

    pub async fn farm_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM farms")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn farms_by_type(pool: &PgPool) -> Result<Vec<FarmTypeCount>, sqlx::Error> {
        sqlx::query_as::<_, FarmTypeCount>(
            "SELECT farm_type, COUNT(*) AS count FROM farms GROUP BY farm_type ORDER BY farm_type",
        )
        .fetch_all(pool)
        .await
    }

    /// Average risk score of scored assessments, grouped by farm type.
    pub async fn risk_by_farm_type(pool: &PgPool) -> Result<Vec<FarmTypeRisk>, sqlx::Error> {
        sqlx::query_as::<_, FarmTypeRisk>(
            "SELECT f.farm_type,
                    COUNT(a.id) AS assessments,
                    AVG(a.risk_score)::DOUBLE PRECISION AS avg_risk_score
             FROM farms f
             JOIN biosecurity_assessments a ON a.farm_id = f.id AND a.risk_score IS NOT NULL
             GROUP BY f.farm_type
             ORDER BY f.farm_type",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn module_counts(pool: &PgPool) -> Result<ModuleCounts, sqlx::Error> {
        sqlx::query_as::<_, ModuleCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE is_published) AS published
             FROM training_modules",
        )
        .fetch_one(pool)
        .await
    }

    /// Distinct learners with any progress row, and with any completed row.
    pub async fn learner_counts(pool: &PgPool) -> Result<LearnerCounts, sqlx::Error> {
        sqlx::query_as::<_, LearnerCounts>(
            "SELECT COUNT(DISTINCT user_id) AS started,
                    COUNT(DISTINCT user_id) FILTER (WHERE completed) AS completed
             FROM user_training_progress",
        )
        .fetch_one(pool)
        .await
    }
}
