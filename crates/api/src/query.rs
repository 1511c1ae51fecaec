//! Query parameter types shared by list and export endpoints.

use biosecure_core::alert::ActiveFilter;
use biosecure_core::training::{SortOrder, StatusFilter};
use serde::Deserialize;

/// Which farms `GET /farms` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FarmScope {
    /// Farms owned by the caller.
    #[default]
    Mine,
    /// Every farm. Requires the all-farms permission.
    All,
}

/// `?scope=mine|all`
#[derive(Debug, Default, Deserialize)]
pub struct FarmListParams {
    #[serde(default)]
    pub scope: FarmScope,
}

/// `?farm_type=&q=&status=&sort=` for the training catalog.
#[derive(Debug, Default, Deserialize)]
pub struct TrainingListParams {
    pub farm_type: Option<String>,
    pub q: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub sort: SortOrder,
}

/// `?q=&severity=&status=&farm_type=&location=` for the alert centre.
///
/// `farm_type` and `location` describe the reader; alerts scoped elsewhere
/// are hidden.
#[derive(Debug, Default, Deserialize)]
pub struct AlertListParams {
    pub q: Option<String>,
    pub severity: Option<String>,
    #[serde(default)]
    pub status: ActiveFilter,
    pub farm_type: Option<String>,
    pub location: Option<String>,
}
