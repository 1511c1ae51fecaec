//! Aggregate rows read by the role dashboards.

use biosecure_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// Count of assessments in one status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Farm count for one farm type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FarmTypeCount {
    pub farm_type: String,
    pub count: i64,
}

/// Average scored-assessment risk score for one farm type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FarmTypeRisk {
    pub farm_type: String,
    pub assessments: i64,
    pub avg_risk_score: Option<f64>,
}

/// A farm with the checklist items currently marked compliant.
#[derive(Debug, Clone, FromRow)]
pub struct FarmCompliance {
    pub farm_id: DbId,
    pub farm_type: String,
    pub compliant_items: Vec<String>,
}

/// Latest scored assessment for a farm.
#[derive(Debug, Clone, FromRow)]
pub struct LatestScore {
    pub farm_id: DbId,
    pub risk_score: i32,
}

/// Module totals for content authors.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct ModuleCounts {
    pub total: i64,
    pub published: i64,
}

/// Distinct learners who started and who completed at least one module.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct LearnerCounts {
    pub started: i64,
    pub completed: i64,
}
