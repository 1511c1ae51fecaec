//! Handlers for biosecurity assessments.
//!
//! Completed assessments are written in one statement after scoring; a
//! submission that fails validation never reaches the database. Drafts move
//! through `draft -> completed -> reviewed` by compare-and-set updates, so a
//! lost race is reported as 409 instead of overwriting.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use biosecure_core::assessment::{
    answer_progress_pct, assessment_data, evaluate, parse_answers, parse_responses,
    validate_known_questions, validate_recommendations, validate_transition, AssessmentOutcome,
    AssessmentStatus, Question, RiskLevel, QUESTIONS,
};
use biosecure_core::error::CoreError;
use biosecure_core::export::CsvBuilder;
use biosecure_core::policy::FarmAction;
use biosecure_core::types::DbId;
use biosecure_db::models::assessment::{
    Assessment, CreateCompletedAssessment, CreateDraftAssessment, SubmitDraft,
};
use biosecure_db::repositories::AssessmentRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::farm::authorize_farm;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireReviewer;
use crate::response::DataResponse;
use crate::state::AppState;

/// How many of the caller's own assessments `GET /assessments` returns.
const MY_ASSESSMENTS_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for submitting a completed assessment.
#[derive(Debug, Deserialize)]
pub struct SubmitAssessmentRequest {
    /// `{question_id: "yes" | "no" | "partial"}`
    pub responses: BTreeMap<String, String>,
    pub recommendations: Option<String>,
}

/// Request body for creating or updating a draft. Responses may be partial.
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    #[serde(default)]
    pub responses: BTreeMap<String, String>,
    pub recommendations: Option<String>,
}

/// Request body for `POST /assessments/{id}/submit`.
///
/// Without `responses` the stored draft answers are scored.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitDraftRequest {
    pub responses: Option<BTreeMap<String, String>>,
    pub recommendations: Option<String>,
}

/// Request body for `POST /assessments/{id}/review`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(length(max = 5000))]
    pub review_notes: Option<String>,
}

/// An assessment row with derived fields for display.
#[derive(Debug, Serialize)]
pub struct AssessmentView {
    #[serde(flatten)]
    pub assessment: Assessment,
    /// `None` while the assessment is an unscored draft.
    pub risk_level: Option<RiskLevel>,
    pub answer_progress_pct: u8,
}

impl From<Assessment> for AssessmentView {
    fn from(assessment: Assessment) -> Self {
        let risk_level = assessment
            .risk_score
            .map(|s| RiskLevel::from_score(s.clamp(0, 100) as u8));
        let answer_progress_pct =
            answer_progress_pct(&parse_responses(&assessment.assessment_data));
        Self {
            assessment,
            risk_level,
            answer_progress_pct,
        }
    }
}

/// Response for a scored submission: the stored row plus the outcome summary.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub assessment: Assessment,
    pub outcome: AssessmentOutcome,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_assessment(state: &AppState, id: DbId) -> AppResult<Assessment> {
    AssessmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Assessment",
            id,
        }))
}

fn current_status(assessment: &Assessment) -> AppResult<AssessmentStatus> {
    AssessmentStatus::from_str_value(&assessment.status).map_err(AppError::InternalError)
}

/// Only the assessor may edit or submit their own draft.
fn require_assessor(user: &AuthUser, assessment: &Assessment) -> AppResult<()> {
    if assessment.assessor_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the assessor may change this assessment".into(),
        )));
    }
    Ok(())
}

fn lost_race(id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Assessment {id} changed status while this request was in flight"
    )))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/assessments/questions
pub async fn list_questions(_user: AuthUser) -> Json<DataResponse<&'static [Question]>> {
    Json(DataResponse { data: QUESTIONS })
}

/// GET /api/v1/assessments
///
/// Assessments written by the caller, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<AssessmentView>>>> {
    let rows = AssessmentRepo::list_by_assessor(&state.pool, user.user_id, MY_ASSESSMENTS_LIMIT)
        .await?;
    Ok(Json(DataResponse {
        data: rows.into_iter().map(AssessmentView::from).collect(),
    }))
}

/// GET /api/v1/farms/{id}/assessments
pub async fn list_for_farm(
    State(state): State<AppState>,
    user: AuthUser,
    Path(farm_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<AssessmentView>>>> {
    authorize_farm(&state, &user, farm_id, FarmAction::View).await?;
    let rows = AssessmentRepo::list_by_farm(&state.pool, farm_id).await?;
    Ok(Json(DataResponse {
        data: rows.into_iter().map(AssessmentView::from).collect(),
    }))
}

/// POST /api/v1/farms/{id}/assessments
///
/// Score a fully answered questionnaire and store it as `completed`.
pub async fn submit_assessment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(farm_id): Path<DbId>,
    Json(input): Json<SubmitAssessmentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SubmissionResponse>>)> {
    authorize_farm(&state, &user, farm_id, FarmAction::Assess).await?;

    let responses = parse_answers(&input.responses)?;
    validate_recommendations(input.recommendations.as_deref())?;
    let outcome = evaluate(&responses)?;

    let assessment = AssessmentRepo::create_completed(
        &state.pool,
        &CreateCompletedAssessment {
            farm_id,
            assessor_id: user.user_id,
            assessment_data: assessment_data(&responses),
            risk_score: i32::from(outcome.risk_score),
            recommendations: input.recommendations,
        },
    )
    .await?;

    tracing::info!(
        assessment_id = assessment.id,
        farm_id,
        user_id = user.user_id,
        risk_score = outcome.risk_score,
        "Assessment submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmissionResponse {
                assessment,
                outcome,
            },
        }),
    ))
}

/// POST /api/v1/farms/{id}/assessments/drafts
pub async fn create_draft(
    State(state): State<AppState>,
    user: AuthUser,
    Path(farm_id): Path<DbId>,
    Json(input): Json<DraftRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AssessmentView>>)> {
    authorize_farm(&state, &user, farm_id, FarmAction::Assess).await?;

    let responses = parse_answers(&input.responses)?;
    validate_known_questions(&responses)?;
    validate_recommendations(input.recommendations.as_deref())?;

    let draft = AssessmentRepo::create_draft(
        &state.pool,
        &CreateDraftAssessment {
            farm_id,
            assessor_id: user.user_id,
            assessment_data: assessment_data(&responses),
            recommendations: input.recommendations,
        },
    )
    .await?;

    tracing::info!(
        assessment_id = draft.id,
        farm_id,
        user_id = user.user_id,
        "Draft assessment created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: draft.into() })))
}

/// GET /api/v1/assessments/{id}
pub async fn get_assessment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AssessmentView>>> {
    let assessment = find_assessment(&state, id).await?;
    if assessment.assessor_id != user.user_id {
        authorize_farm(&state, &user, assessment.farm_id, FarmAction::View).await?;
    }
    Ok(Json(DataResponse {
        data: assessment.into(),
    }))
}

/// PUT /api/v1/assessments/{id}/responses
///
/// Replace a draft's answers. Rejected with 409 once the draft is submitted.
pub async fn update_responses(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<DraftRequest>,
) -> AppResult<Json<DataResponse<AssessmentView>>> {
    let assessment = find_assessment(&state, id).await?;
    require_assessor(&user, &assessment)?;
    if current_status(&assessment)? != AssessmentStatus::Draft {
        return Err(AppError::Core(CoreError::Conflict(
            "Only draft assessments can be edited".into(),
        )));
    }

    let responses = parse_answers(&input.responses)?;
    validate_known_questions(&responses)?;
    validate_recommendations(input.recommendations.as_deref())?;

    let updated = AssessmentRepo::update_draft(
        &state.pool,
        id,
        &assessment_data(&responses),
        input.recommendations.as_deref(),
    )
    .await?
    .ok_or_else(|| lost_race(id))?;

    tracing::info!(assessment_id = id, user_id = user.user_id, "Draft responses updated");
    Ok(Json(DataResponse {
        data: updated.into(),
    }))
}

/// POST /api/v1/assessments/{id}/submit
///
/// `draft -> completed`. The answers must be complete.
pub async fn submit_draft(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SubmitDraftRequest>,
) -> AppResult<Json<DataResponse<SubmissionResponse>>> {
    let assessment = find_assessment(&state, id).await?;
    require_assessor(&user, &assessment)?;
    validate_transition(current_status(&assessment)?, AssessmentStatus::Completed)?;

    let responses = match &input.responses {
        Some(raw) => parse_answers(raw)?,
        None => parse_responses(&assessment.assessment_data),
    };
    validate_recommendations(input.recommendations.as_deref())?;
    let outcome = evaluate(&responses)?;

    let completed = AssessmentRepo::submit_draft(
        &state.pool,
        id,
        &SubmitDraft {
            assessment_data: assessment_data(&responses),
            risk_score: i32::from(outcome.risk_score),
            recommendations: input.recommendations,
        },
    )
    .await?
    .ok_or_else(|| lost_race(id))?;

    tracing::info!(
        assessment_id = id,
        user_id = user.user_id,
        risk_score = outcome.risk_score,
        "Draft assessment submitted"
    );

    Ok(Json(DataResponse {
        data: SubmissionResponse {
            assessment: completed,
            outcome,
        },
    }))
}

/// POST /api/v1/assessments/{id}/review
///
/// `completed -> reviewed`. Veterinarians and regulators only.
pub async fn review_assessment(
    State(state): State<AppState>,
    RequireReviewer(user): RequireReviewer,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<Json<DataResponse<AssessmentView>>> {
    input.validate()?;
    let assessment = find_assessment(&state, id).await?;
    validate_transition(current_status(&assessment)?, AssessmentStatus::Reviewed)?;

    let reviewed =
        AssessmentRepo::mark_reviewed(&state.pool, id, user.user_id, input.review_notes.as_deref())
            .await?
            .ok_or_else(|| lost_race(id))?;

    tracing::info!(assessment_id = id, reviewer_id = user.user_id, "Assessment reviewed");
    Ok(Json(DataResponse {
        data: reviewed.into(),
    }))
}

/// GET /api/v1/farms/{id}/assessments/export
///
/// The farm's assessments as `text/csv`.
pub async fn export_for_farm(
    State(state): State<AppState>,
    user: AuthUser,
    Path(farm_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let farm = authorize_farm(&state, &user, farm_id, FarmAction::View).await?;
    let rows = AssessmentRepo::list_by_farm(&state.pool, farm_id).await?;

    let mut csv = CsvBuilder::new(&[
        "id",
        "farm",
        "status",
        "risk_score",
        "risk_level",
        "recommendations",
        "review_notes",
        "completed_at",
        "reviewed_at",
        "created_at",
    ]);
    for row in rows {
        let view = AssessmentView::from(row);
        let a = &view.assessment;
        csv.row([
            a.id.to_string(),
            farm.name.clone(),
            a.status.clone(),
            a.risk_score.map(|s| s.to_string()).unwrap_or_default(),
            view.risk_level.map(|l| l.as_str().to_string()).unwrap_or_default(),
            a.recommendations.clone().unwrap_or_default(),
            a.review_notes.clone().unwrap_or_default(),
            a.completed_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            a.reviewed_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            a.created_at.to_rfc3339(),
        ]);
    }

    tracing::info!(farm_id, user_id = user.user_id, "Assessments exported");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"farm-{farm_id}-assessments.csv\""),
            ),
        ],
        csv.finish(),
    ))
}
