//! Biosecurity risk assessment: question set, scoring, and status rules.
//!
//! An assessment is a mapping from question id to [`Answer`]. The risk score
//! is the rounded percentage of questions answered "yes"; "partial" counts
//! the same as "no". Scores classify into three fixed tiers, see
//! [`RiskLevel::from_score`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::percent::rounded_percentage;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Scores at or above this are low risk.
pub const LOW_RISK_MIN_SCORE: u8 = 80;

/// Scores at or above this (and below [`LOW_RISK_MIN_SCORE`]) are medium risk.
pub const MEDIUM_RISK_MIN_SCORE: u8 = 60;

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_REVIEWED: &str = "reviewed";

pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_COMPLETED, STATUS_REVIEWED];

/// Maximum length of free-text recommendations and review notes.
pub const MAX_RECOMMENDATIONS_LENGTH: usize = 5_000;

/// A single checklist question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub category: &'static str,
    pub text: &'static str,
}

/// The fixed question set. Order is presentation order.
pub const QUESTIONS: &[Question] = &[
    Question {
        id: "biosecurity_plan",
        category: "Planning",
        text: "Does the farm have a documented biosecurity plan that is reviewed regularly?",
    },
    Question {
        id: "visitor_control",
        category: "Access",
        text: "Are visitors restricted and recorded in a visitor log?",
    },
    Question {
        id: "vehicle_disinfection",
        category: "Sanitation",
        text: "Are vehicles disinfected before entering the farm premises?",
    },
    Question {
        id: "feed_storage",
        category: "Feed",
        text: "Is feed stored in sealed containers protected from pests and wild birds?",
    },
    Question {
        id: "water_quality",
        category: "Water",
        text: "Is drinking water tested for quality on a regular schedule?",
    },
    Question {
        id: "waste_management",
        category: "Waste",
        text: "Are manure, litter and carcasses disposed of through a managed system?",
    },
    Question {
        id: "quarantine_facilities",
        category: "Health",
        text: "Are new or sick animals isolated in dedicated quarantine facilities?",
    },
    Question {
        id: "staff_training",
        category: "HR",
        text: "Have all staff been trained in biosecurity protocols?",
    },
];

/// Look up a question by id.
pub fn find_question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
    Partial,
}

impl Answer {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "partial" => Ok(Self::Partial),
            _ => Err(format!("Invalid answer '{s}'. Must be one of: yes, no, partial")),
        }
    }
}

/// Responses keyed by question id.
pub type Responses = BTreeMap<String, Answer>;

/// Parse raw `{question_id: answer}` strings from a request body.
pub fn parse_answers(raw: &BTreeMap<String, String>) -> Result<Responses, CoreError> {
    raw.iter()
        .map(|(id, value)| {
            Answer::from_str_value(value)
                .map(|a| (id.clone(), a))
                .map_err(|e| CoreError::Validation(format!("{id}: {e}")))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a score. `≥ 80` low, `60..80` medium, below 60 high.
    pub fn from_score(score: u8) -> Self {
        if score >= LOW_RISK_MIN_SCORE {
            Self::Low
        } else if score >= MEDIUM_RISK_MIN_SCORE {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentStatus {
    Draft,
    Completed,
    Reviewed,
}

impl AssessmentStatus {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_REVIEWED => Ok(Self::Reviewed),
            _ => Err(format!(
                "Invalid assessment status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Completed => STATUS_COMPLETED,
            Self::Reviewed => STATUS_REVIEWED,
        }
    }

    /// Only `draft -> completed` and `completed -> reviewed` are allowed.
    pub fn can_transition_to(&self, next: AssessmentStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Completed) | (Self::Completed, Self::Reviewed)
        )
    }
}

/// Reject a status change that is not a legal transition.
pub fn validate_transition(
    current: AssessmentStatus,
    next: AssessmentStatus,
) -> Result<(), CoreError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Assessment cannot move from '{}' to '{}'",
            current.as_str(),
            next.as_str()
        )))
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject responses that reference question ids outside [`QUESTIONS`].
pub fn validate_known_questions(responses: &Responses) -> Result<(), CoreError> {
    let unknown: Vec<&str> = responses
        .keys()
        .filter(|id| find_question(id).is_none())
        .map(String::as_str)
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown question ids: {}",
            unknown.join(", ")
        )))
    }
}

/// Require every question to be answered before submission.
pub fn validate_complete(responses: &Responses) -> Result<(), CoreError> {
    validate_known_questions(responses)?;

    let missing: Vec<&str> = QUESTIONS
        .iter()
        .filter(|q| !responses.contains_key(q.id))
        .map(|q| q.id)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Please answer all questions before submitting ({} of {} answered; missing: {})",
            QUESTIONS.len() - missing.len(),
            QUESTIONS.len(),
            missing.join(", ")
        )))
    }
}

/// Validate optional free text attached to an assessment.
pub fn validate_recommendations(text: Option<&str>) -> Result<(), CoreError> {
    match text {
        Some(t) if t.chars().count() > MAX_RECOMMENDATIONS_LENGTH => Err(CoreError::Validation(
            format!("recommendations must be at most {MAX_RECOMMENDATIONS_LENGTH} characters"),
        )),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// `round(100 × yes / total_questions)`. Unanswered questions count as not "yes".
pub fn compute_risk_score(responses: &Responses) -> u8 {
    let yes = QUESTIONS
        .iter()
        .filter(|q| responses.get(q.id) == Some(&Answer::Yes))
        .count();
    rounded_percentage(yes, QUESTIONS.len())
}

/// Count of "yes" answers per category. Every category is present, even at 0.
pub fn category_tally(responses: &Responses) -> BTreeMap<String, u32> {
    let mut tally = BTreeMap::new();
    for q in QUESTIONS {
        let entry = tally.entry(q.category.to_string()).or_insert(0);
        if responses.get(q.id) == Some(&Answer::Yes) {
            *entry += 1;
        }
    }
    tally
}

/// Questions not answered "yes", in presentation order.
pub fn improvement_areas(responses: &Responses) -> Vec<&'static Question> {
    QUESTIONS
        .iter()
        .filter(|q| responses.get(q.id) != Some(&Answer::Yes))
        .collect()
}

/// Percentage of questions answered so far.
pub fn answer_progress_pct(responses: &Responses) -> u8 {
    let answered = QUESTIONS
        .iter()
        .filter(|q| responses.contains_key(q.id))
        .count();
    rounded_percentage(answered, QUESTIONS.len())
}

/// Result of scoring a fully answered assessment.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentOutcome {
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub categories: BTreeMap<String, u32>,
    /// Populated only when the score is below the low-risk threshold.
    pub improvement_areas: Vec<Question>,
}

/// Validate completeness and score. Nothing should be persisted on `Err`.
pub fn evaluate(responses: &Responses) -> Result<AssessmentOutcome, CoreError> {
    validate_complete(responses)?;
    Ok(summarize(responses))
}

/// Score and improvement areas for responses already checked complete.
fn summarize(responses: &Responses) -> AssessmentOutcome {
    let risk_score = compute_risk_score(responses);
    let improvement_areas = if risk_score < LOW_RISK_MIN_SCORE {
        improvement_areas(responses).into_iter().copied().collect()
    } else {
        Vec::new()
    };
    AssessmentOutcome {
        risk_score,
        risk_level: RiskLevel::from_score(risk_score),
        categories: category_tally(responses),
        improvement_areas,
    }
}

// ---------------------------------------------------------------------------
// Storage shape
// ---------------------------------------------------------------------------

/// Build the `assessment_data` JSONB value: `{responses, categories}`.
pub fn assessment_data(responses: &Responses) -> serde_json::Value {
    serde_json::json!({
        "responses": responses,
        "categories": category_tally(responses),
    })
}

/// Read responses back out of a stored `assessment_data` value.
///
/// Entries with unrecognised answers are skipped rather than failing the read.
pub fn parse_responses(data: &serde_json::Value) -> Responses {
    let Some(obj) = data.get("responses").and_then(|v| v.as_object()) else {
        return Responses::new();
    };
    obj.iter()
        .filter_map(|(id, value)| {
            serde_json::from_value::<Answer>(value.clone())
                .ok()
                .map(|answer| (id.clone(), answer))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn answer_all(yes_count: usize) -> Responses {
        QUESTIONS
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let a = if i < yes_count { Answer::Yes } else { Answer::No };
                (q.id.to_string(), a)
            })
            .collect()
    }

    #[test]
    fn question_set_has_eight_unique_ids() {
        assert_eq!(QUESTIONS.len(), 8);
        let mut ids: Vec<_> = QUESTIONS.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn score_is_rounded_share_of_yes() {
        let expected = [0, 13, 25, 38, 50, 63, 75, 88, 100];
        for (yes, want) in expected.iter().enumerate() {
            assert_eq!(compute_risk_score(&answer_all(yes)), *want, "{yes} yes answers");
        }
    }

    #[test]
    fn partial_counts_as_not_yes() {
        let mut responses = answer_all(8);
        responses.insert("staff_training".into(), Answer::Partial);
        responses.insert("water_quality".into(), Answer::Partial);
        assert_eq!(compute_risk_score(&responses), 75);
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(79), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0), RiskLevel::High);
    }

    #[test]
    fn classification_is_monotonic() {
        let mut prev = RiskLevel::from_score(0);
        for s in 1..=100u8 {
            let level = RiskLevel::from_score(s);
            let rank = |l: RiskLevel| match l {
                RiskLevel::High => 0,
                RiskLevel::Medium => 1,
                RiskLevel::Low => 2,
            };
            assert!(rank(level) >= rank(prev), "score {s} went down a tier");
            prev = level;
        }
    }

    #[test]
    fn incomplete_responses_are_rejected() {
        let mut responses = answer_all(8);
        responses.remove("feed_storage");
        let err = evaluate(&responses).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("feed_storage"));
    }

    #[test]
    fn unknown_answer_text_is_a_validation_error() {
        let mut raw = BTreeMap::new();
        raw.insert("visitor_control".to_string(), "yes".to_string());
        raw.insert("feed_storage".to_string(), "maybe".to_string());
        let err = parse_answers(&raw).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.starts_with("feed_storage"));

        raw.remove("feed_storage");
        let parsed = parse_answers(&raw).unwrap();
        assert_eq!(parsed.get("visitor_control"), Some(&Answer::Yes));
    }

    #[test]
    fn empty_responses_are_rejected() {
        assert_matches!(evaluate(&Responses::new()), Err(CoreError::Validation(_)));
    }

    #[test]
    fn any_complete_answer_set_is_accepted() {
        let all_partial: Responses = QUESTIONS
            .iter()
            .map(|q| (q.id.to_string(), Answer::Partial))
            .collect();
        let outcome = evaluate(&all_partial).expect("complete responses should evaluate");
        assert_eq!(outcome.risk_score, 0);
        assert_eq!(outcome.risk_level, RiskLevel::High);
    }

    #[test]
    fn unknown_question_is_rejected() {
        let mut responses = answer_all(8);
        responses.insert("moat_depth".into(), Answer::Yes);
        assert_matches!(
            validate_known_questions(&responses),
            Err(CoreError::Validation(msg)) if msg.contains("moat_depth")
        );
    }

    #[test]
    fn improvement_areas_listed_below_low_threshold() {
        let outcome = evaluate(&answer_all(6)).unwrap();
        assert_eq!(outcome.risk_score, 75);
        let ids: Vec<_> = outcome.improvement_areas.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec!["quarantine_facilities", "staff_training"]);
    }

    #[test]
    fn no_improvement_areas_when_low_risk() {
        let outcome = evaluate(&answer_all(7)).unwrap();
        assert_eq!(outcome.risk_level, RiskLevel::Low);
        assert!(outcome.improvement_areas.is_empty());
    }

    #[test]
    fn category_tally_covers_every_category() {
        let tally = category_tally(&answer_all(2));
        assert_eq!(tally.len(), 8);
        assert_eq!(tally["Planning"], 1);
        assert_eq!(tally["Access"], 1);
        assert_eq!(tally["HR"], 0);
    }

    #[test]
    fn progress_tracks_answered_share() {
        let mut responses = Responses::new();
        assert_eq!(answer_progress_pct(&responses), 0);
        responses.insert("biosecurity_plan".into(), Answer::No);
        responses.insert("visitor_control".into(), Answer::Partial);
        assert_eq!(answer_progress_pct(&responses), 25);
    }

    #[test]
    fn stored_data_round_trips_responses() {
        let responses = answer_all(3);
        let data = assessment_data(&responses);
        assert_eq!(data["categories"]["Planning"], 1);
        assert_eq!(parse_responses(&data), responses);
    }

    #[test]
    fn parse_skips_garbage_answers() {
        let data = serde_json::json!({
            "responses": { "biosecurity_plan": "yes", "feed_storage": "maybe" }
        });
        let parsed = parse_responses(&data);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["biosecurity_plan"], Answer::Yes);
        assert!(parse_responses(&serde_json::json!({})).is_empty());
    }

    #[test]
    fn status_transitions() {
        use AssessmentStatus::*;
        assert!(Draft.can_transition_to(Completed));
        assert!(Completed.can_transition_to(Reviewed));
        assert!(!Draft.can_transition_to(Reviewed));
        assert!(!Completed.can_transition_to(Draft));
        assert!(!Reviewed.can_transition_to(Completed));
        assert_matches!(
            validate_transition(Reviewed, Completed),
            Err(CoreError::Conflict(_))
        );
    }
}
