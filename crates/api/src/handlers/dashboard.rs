//! The role-routed dashboard.
//!
//! `GET /dashboard` picks the payload from the caller's role via
//! [`dashboard_for`]. Each payload is tagged with its `kind`.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use biosecure_core::assessment::RiskLevel;
use biosecure_core::compliance::compliance_rate;
use biosecure_core::dashboard::{mean_one_decimal, round_one_decimal, RiskDistribution};
use biosecure_core::farm::FarmType;
use biosecure_core::policy::{dashboard_for, DashboardKind, Permission};
use biosecure_core::types::DbId;
use biosecure_db::models::dashboard::{
    FarmCompliance, FarmTypeCount, LearnerCounts, ModuleCounts, StatusCount,
};
use biosecure_db::models::farm::Farm;
use biosecure_db::models::training::ProgressSummary;
use biosecure_db::repositories::{
    AlertRepo, AssessmentRepo, DashboardRepo, FarmRepo, TrainingProgressRepo,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::alert::unread_live_count;
use crate::handlers::assessment::AssessmentView;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::ensure_permitted;
use crate::response::DataResponse;
use crate::state::AppState;

const RECENT_REPORTS_LIMIT: i64 = 5;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dashboard {
    Farmer(FarmerDashboard),
    Veterinarian(VeterinarianDashboard),
    ExtensionWorker(ExtensionWorkerDashboard),
    Regulator(RegulatorDashboard),
    Researcher(ResearcherDashboard),
}

/// One of the caller's farms with its latest risk and compliance.
#[derive(Debug, Serialize)]
pub struct FarmSummary {
    #[serde(flatten)]
    pub farm: Farm,
    pub latest_risk_score: Option<i32>,
    pub risk_level: Option<RiskLevel>,
    pub compliance_rate: u8,
}

#[derive(Debug, Serialize)]
pub struct FarmerDashboard {
    pub farms: Vec<FarmSummary>,
    pub training: ProgressSummary,
    pub unread_alerts: usize,
}

#[derive(Debug, Serialize)]
pub struct VeterinarianDashboard {
    pub client_farms: Vec<Farm>,
    pub reports_by_status: Vec<StatusCount>,
    pub recent_reports: Vec<AssessmentView>,
}

#[derive(Debug, Serialize)]
pub struct ExtensionWorkerDashboard {
    pub modules: ModuleCounts,
    pub learners: LearnerCounts,
}

#[derive(Debug, Serialize)]
pub struct RegulatorDashboard {
    pub farm_count: i64,
    pub active_alerts: i64,
    pub assessments_by_status: Vec<StatusCount>,
    /// Mean compliance rate across farms, one decimal. `None` with no farms.
    pub average_compliance_rate: Option<f64>,
    pub risk_distribution: RiskDistribution,
}

/// Average risk score for one farm type, one decimal.
#[derive(Debug, Serialize)]
pub struct FarmTypeRiskSummary {
    pub farm_type: String,
    pub assessments: i64,
    pub average_risk_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ResearcherDashboard {
    pub farms_by_type: Vec<FarmTypeCount>,
    pub risk_by_farm_type: Vec<FarmTypeRiskSummary>,
    pub risk_distribution: RiskDistribution,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Compliance rate for a farm row. Rows with an unknown farm type score 0.
fn rate_for(row: &FarmCompliance) -> u8 {
    FarmType::from_str_value(&row.farm_type)
        .map(|ft| compliance_rate(ft, &row.compliant_items))
        .unwrap_or(0)
}

async fn farmer(state: &AppState, user_id: DbId) -> AppResult<FarmerDashboard> {
    let farms = FarmRepo::list_by_owner(&state.pool, user_id).await?;
    let ids: Vec<DbId> = farms.iter().map(|f| f.id).collect();
    let farm_types: Vec<FarmType> = farms
        .iter()
        .filter_map(|f| FarmType::from_str_value(&f.farm_type).ok())
        .collect();

    let scores: HashMap<DbId, i32> = DashboardRepo::latest_scores(&state.pool, &ids)
        .await?
        .into_iter()
        .map(|s| (s.farm_id, s.risk_score))
        .collect();
    let rates: HashMap<DbId, u8> =
        DashboardRepo::farm_compliance(&state.pool, Some(ids.as_slice()))
            .await?
            .iter()
            .map(|row| (row.farm_id, rate_for(row)))
            .collect();

    let farms = farms
        .into_iter()
        .map(|farm| {
            let latest_risk_score = scores.get(&farm.id).copied();
            FarmSummary {
                risk_level: latest_risk_score
                    .map(|s| RiskLevel::from_score(s.clamp(0, 100) as u8)),
                compliance_rate: rates.get(&farm.id).copied().unwrap_or(0),
                latest_risk_score,
                farm,
            }
        })
        .collect();

    Ok(FarmerDashboard {
        farms,
        training: TrainingProgressRepo::summary_for_user(&state.pool, user_id).await?,
        unread_alerts: unread_live_count(state, user_id, &farm_types).await?,
    })
}

async fn veterinarian(state: &AppState, user_id: DbId) -> AppResult<VeterinarianDashboard> {
    let recent = AssessmentRepo::list_by_assessor(&state.pool, user_id, RECENT_REPORTS_LIMIT)
        .await?;
    Ok(VeterinarianDashboard {
        client_farms: FarmRepo::list_assessed_by(&state.pool, user_id).await?,
        reports_by_status: DashboardRepo::assessment_status_counts(&state.pool, Some(user_id))
            .await?,
        recent_reports: recent.into_iter().map(AssessmentView::from).collect(),
    })
}

async fn extension_worker(state: &AppState) -> AppResult<ExtensionWorkerDashboard> {
    Ok(ExtensionWorkerDashboard {
        modules: DashboardRepo::module_counts(&state.pool).await?,
        learners: DashboardRepo::learner_counts(&state.pool).await?,
    })
}

async fn regulator(state: &AppState) -> AppResult<RegulatorDashboard> {
    let compliance = DashboardRepo::farm_compliance(&state.pool, None).await?;
    let scores = DashboardRepo::scored_risk_scores(&state.pool).await?;
    Ok(RegulatorDashboard {
        farm_count: DashboardRepo::farm_count(&state.pool).await?,
        active_alerts: AlertRepo::count_live(&state.pool).await?,
        assessments_by_status: DashboardRepo::assessment_status_counts(&state.pool, None).await?,
        average_compliance_rate: mean_one_decimal(
            compliance.iter().map(|row| f64::from(rate_for(row))),
        ),
        risk_distribution: RiskDistribution::from_scores(scores),
    })
}

async fn researcher(state: &AppState) -> AppResult<ResearcherDashboard> {
    let risk_by_farm_type = DashboardRepo::risk_by_farm_type(&state.pool)
        .await?
        .into_iter()
        .map(|row| FarmTypeRiskSummary {
            farm_type: row.farm_type,
            assessments: row.assessments,
            average_risk_score: row.avg_risk_score.map(round_one_decimal),
        })
        .collect();
    let scores = DashboardRepo::scored_risk_scores(&state.pool).await?;
    Ok(ResearcherDashboard {
        farms_by_type: DashboardRepo::farms_by_type(&state.pool).await?,
        risk_by_farm_type,
        risk_distribution: RiskDistribution::from_scores(scores),
    })
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Dashboard>>> {
    let dashboard = match dashboard_for(user.role) {
        DashboardKind::Farmer => Dashboard::Farmer(farmer(&state, user.user_id).await?),
        DashboardKind::Veterinarian => {
            Dashboard::Veterinarian(veterinarian(&state, user.user_id).await?)
        }
        DashboardKind::ExtensionWorker => {
            Dashboard::ExtensionWorker(extension_worker(&state).await?)
        }
        DashboardKind::Regulator => {
            ensure_permitted(&user, Permission::ViewAnalytics)?;
            Dashboard::Regulator(regulator(&state).await?)
        }
        DashboardKind::Researcher => {
            ensure_permitted(&user, Permission::ViewAnalytics)?;
            Dashboard::Researcher(researcher(&state).await?)
        }
    };
    Ok(Json(DataResponse { data: dashboard }))
}
