//! Training catalog filtering and per-learner progress rules.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::farm::FarmType;

pub const MIN_DURATION_MINUTES: i32 = 1;
pub const MAX_DURATION_MINUTES: i32 = 1_440;
pub const MAX_TITLE_LENGTH: usize = 200;

/// Clamp a requested progress value to 0..=100 and round to an integer.
///
/// Non-finite input is treated as 0.
pub fn clamp_progress(requested: f64) -> i32 {
    if !requested.is_finite() {
        return 0;
    }
    requested.round().clamp(0.0, 100.0) as i32
}

/// The completed flag after setting a progress percentage.
///
/// Reaching 100 completes the module. Anything lower keeps the flag the row
/// already had, so a module never "un-completes" by lowering progress.
pub fn completed_after_update(progress_pct: i32, currently_completed: bool) -> bool {
    progress_pct >= 100 || currently_completed
}

/// `completed` implies 100 and 100 implies `completed`.
///
/// Rows can diverge when progress is lowered after completion.
pub fn is_consistent(progress_pct: i32, completed: bool) -> bool {
    completed == (progress_pct >= 100)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest module first.
    #[default]
    Recent,
    /// Shortest duration first.
    Short,
    /// Longest duration first.
    Long,
}

/// The fields of a catalog entry the filters look at.
pub trait CatalogEntry {
    fn title(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn duration_minutes(&self) -> i32;
    fn completed(&self) -> bool;
    fn created_at(&self) -> crate::types::Timestamp;
}

/// Case-insensitive substring match on title or description.
pub fn matches_query<E: CatalogEntry>(entry: &E, query: Option<&str>) -> bool {
    let q = match query.map(str::trim) {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return true,
    };
    entry.title().to_lowercase().contains(&q)
        || entry
            .description()
            .is_some_and(|d| d.to_lowercase().contains(&q))
}

pub fn matches_status<E: CatalogEntry>(entry: &E, status: StatusFilter) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::InProgress => !entry.completed(),
        StatusFilter::Completed => entry.completed(),
    }
}

/// Apply the query and status filters, then sort.
pub fn filter_and_sort<E: CatalogEntry>(
    entries: Vec<E>,
    query: Option<&str>,
    status: StatusFilter,
    sort: SortOrder,
) -> Vec<E> {
    let mut out: Vec<E> = entries
        .into_iter()
        .filter(|e| matches_query(e, query) && matches_status(e, status))
        .collect();
    out.sort_by(|a, b| compare(a, b, sort));
    out
}

fn compare<E: CatalogEntry>(a: &E, b: &E, sort: SortOrder) -> Ordering {
    match sort {
        SortOrder::Recent => b.created_at().cmp(&a.created_at()),
        SortOrder::Short => a.duration_minutes().cmp(&b.duration_minutes()),
        SortOrder::Long => b.duration_minutes().cmp(&a.duration_minutes()),
    }
}

/// Content stored for a new module. Blank text gets a starter outline.
pub fn initial_content(text: Option<&str>, farm_type: Option<FarmType>) -> serde_json::Value {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => starter_template(farm_type),
    };
    serde_json::json!({ "text": text })
}

fn starter_template(farm_type: Option<FarmType>) -> String {
    let audience = farm_type.map_or("pig/poultry", |ft| ft.as_str());
    format!(
        "# Module Overview\n\
         This module covers biosecurity practices for {audience} farms.\n\n\
         ## Learning Objectives\n\
         - Understand the main disease transmission routes\n\
         - Apply entry and hygiene controls\n\n\
         ## Checklist\n\
         - [ ] Review the farm biosecurity plan\n\
         - [ ] Inspect entry points and disinfection stations\n\n\
         ## Best Practices\n\
         - Keep visitor and vehicle logs up to date\n\n\
         ## Assessment\n\
         - Answer the review questions at the end of the module\n"
    )
}

pub fn validate_duration(minutes: i32) -> Result<(), String> {
    if (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(format!(
            "duration_minutes must be between {MIN_DURATION_MINUTES} and {MAX_DURATION_MINUTES}"
        ))
    }
}

/// Learner-facing progress for one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    pub progress_pct: i32,
    pub completed: bool,
    pub consistent: bool,
}

impl ProgressView {
    pub fn new(progress_pct: i32, completed: bool) -> Self {
        Self {
            progress_pct,
            completed,
            consistent: is_consistent(progress_pct, completed),
        }
    }

    /// Progress of a module the learner never started.
    pub fn not_started() -> Self {
        Self::new(0, false)
    }
}
