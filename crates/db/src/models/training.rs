//! Training module and progress models.

use biosecure_core::training::CatalogEntry;
use biosecure_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `training_modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingModule {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub content: serde_json::Value,
    pub duration_minutes: i32,
    pub farm_type: Option<String>,
    pub is_published: bool,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A published module joined with one learner's progress.
///
/// Progress columns are zero / false when the learner has no row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ModuleWithProgress {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub farm_type: Option<String>,
    pub created_at: Timestamp,
    pub progress_pct: i32,
    pub completed: bool,
}

impl CatalogEntry for ModuleWithProgress {
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn duration_minutes(&self) -> i32 {
        self.duration_minutes
    }
    fn completed(&self) -> bool {
        self.completed
    }
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// DTO for inserting a module.
pub struct CreateTrainingModule {
    pub title: String,
    pub description: Option<String>,
    pub content: serde_json::Value,
    pub duration_minutes: i32,
    pub farm_type: Option<String>,
    pub is_published: bool,
    pub created_by: DbId,
}

/// DTO for updating a module. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTrainingModule {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<serde_json::Value>,
    pub duration_minutes: Option<i32>,
    pub farm_type: Option<String>,
    pub is_published: Option<bool>,
}

/// A row from the `user_training_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub module_id: DbId,
    pub progress_pct: i32,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Per-learner totals across all modules.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct ProgressSummary {
    pub started: i64,
    pub completed: i64,
}
