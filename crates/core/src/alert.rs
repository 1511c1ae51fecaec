//! Alert severities, audience scoping and alert-centre filters.

use serde::{Deserialize, Serialize};

use crate::farm::FarmType;
use crate::types::Timestamp;

pub const SEVERITY_LOW: &str = "low";
pub const SEVERITY_MEDIUM: &str = "medium";
pub const SEVERITY_HIGH: &str = "high";
pub const SEVERITY_CRITICAL: &str = "critical";

pub const VALID_SEVERITIES: &[&str] = &[
    SEVERITY_LOW,
    SEVERITY_MEDIUM,
    SEVERITY_HIGH,
    SEVERITY_CRITICAL,
];

/// Upper bound on rows returned by the alert centre.
pub const ALERT_LIST_LIMIT: i64 = 200;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_MESSAGE_LENGTH: usize = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            SEVERITY_LOW => Ok(Self::Low),
            SEVERITY_MEDIUM => Ok(Self::Medium),
            SEVERITY_HIGH => Ok(Self::High),
            SEVERITY_CRITICAL => Ok(Self::Critical),
            _ => Err(format!(
                "Invalid severity '{s}'. Must be one of: {}",
                VALID_SEVERITIES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => SEVERITY_LOW,
            Self::Medium => SEVERITY_MEDIUM,
            Self::High => SEVERITY_HIGH,
            Self::Critical => SEVERITY_CRITICAL,
        }
    }
}

/// Active-state filter for the alert centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveFilter {
    #[default]
    Active,
    Inactive,
    All,
}

/// An alert is live while its flag is set and it has not expired.
pub fn is_live(is_active: bool, expires_at: Option<Timestamp>, now: Timestamp) -> bool {
    is_active && expires_at.map_or(true, |exp| exp > now)
}

/// Whether an alert scoped to `farm_type`/`location` reaches a reader.
///
/// A missing scope on the alert reaches everyone. A missing reader filter
/// accepts any alert. Locations compare case-insensitively.
pub fn in_scope(
    alert_farm_type: Option<FarmType>,
    alert_location: Option<&str>,
    reader_farm_type: Option<FarmType>,
    reader_location: Option<&str>,
) -> bool {
    let type_ok = match (alert_farm_type, reader_farm_type) {
        (Some(a), Some(r)) => a == r,
        _ => true,
    };
    let location_ok = match (alert_location, reader_location.map(str::trim)) {
        (Some(a), Some(r)) if !r.is_empty() => a.eq_ignore_ascii_case(r),
        _ => true,
    };
    type_ok && location_ok
}

/// Whether an alert scoped to `alert_farm_type` reaches someone who keeps
/// any of `reader_farm_types`. An empty set accepts every alert.
pub fn reaches_any_farm_type(
    alert_farm_type: Option<FarmType>,
    reader_farm_types: &[FarmType],
) -> bool {
    reader_farm_types.is_empty()
        || reader_farm_types
            .iter()
            .any(|ft| in_scope(alert_farm_type, None, Some(*ft), None))
}

/// Case-insensitive substring match over title and message.
pub fn matches_query(title: &str, message: &str, query: Option<&str>) -> bool {
    match query.map(str::trim) {
        Some(q) if !q.is_empty() => {
            let q = q.to_lowercase();
            title.to_lowercase().contains(&q) || message.to_lowercase().contains(&q)
        }
        _ => true,
    }
}

pub fn matches_active(live: bool, filter: ActiveFilter) -> bool {
    match filter {
        ActiveFilter::All => true,
        ActiveFilter::Active => live,
        ActiveFilter::Inactive => !live,
    }
}

/// An expiry must lie in the future when the alert is created.
pub fn validate_expiry(expires_at: Option<Timestamp>, now: Timestamp) -> Result<(), String> {
    match expires_at {
        Some(exp) if exp <= now => Err("expires_at must be in the future".to_string()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn severities_parse_and_order() {
        assert_eq!(Severity::from_str_value("critical").unwrap(), Severity::Critical);
        assert!(Severity::from_str_value("urgent").is_err());
        assert!(Severity::Critical > Severity::Low);
    }

    #[test]
    fn expired_alerts_are_not_live() {
        let now = Utc::now();
        assert!(is_live(true, None, now));
        assert!(is_live(true, Some(now + Duration::hours(1)), now));
        assert!(!is_live(true, Some(now - Duration::hours(1)), now));
        assert!(!is_live(false, None, now));
    }

    #[test]
    fn unscoped_alerts_reach_everyone() {
        assert!(in_scope(None, None, Some(FarmType::Pig), Some("North")));
    }

    #[test]
    fn farm_type_scope_excludes_other_types() {
        assert!(!in_scope(Some(FarmType::Poultry), None, Some(FarmType::Pig), None));
        assert!(in_scope(Some(FarmType::Poultry), None, Some(FarmType::Poultry), None));
        assert!(in_scope(Some(FarmType::Poultry), None, None, None));
    }

    #[test]
    fn farm_type_set_matches_any_member() {
        let kept = [FarmType::Pig, FarmType::Mixed];
        assert!(reaches_any_farm_type(Some(FarmType::Mixed), &kept));
        assert!(reaches_any_farm_type(None, &kept));
        assert!(!reaches_any_farm_type(Some(FarmType::Poultry), &kept));
        assert!(reaches_any_farm_type(Some(FarmType::Poultry), &[]));
    }

    #[test]
    fn location_scope_ignores_case() {
        assert!(in_scope(None, Some("North Region"), None, Some("north region")));
        assert!(!in_scope(None, Some("North Region"), None, Some("South")));
        assert!(in_scope(None, Some("North Region"), None, Some("")));
    }

    #[test]
    fn query_matches_title_or_message() {
        assert!(matches_query("ASF outbreak", "Restrict movement", Some("asf")));
        assert!(matches_query("ASF outbreak", "Restrict movement", Some("MOVEMENT")));
        assert!(!matches_query("ASF outbreak", "Restrict movement", Some("avian")));
        assert!(matches_query("x", "y", None));
    }

    #[test]
    fn active_filter() {
        assert!(matches_active(false, ActiveFilter::All));
        assert!(matches_active(false, ActiveFilter::Inactive));
        assert!(!matches_active(false, ActiveFilter::Active));
    }

    #[test]
    fn past_expiry_is_rejected() {
        let now = Utc::now();
        assert!(validate_expiry(Some(now - Duration::minutes(1)), now).is_err());
        assert!(validate_expiry(Some(now + Duration::days(1)), now).is_ok());
        assert!(validate_expiry(None, now).is_ok());
    }
}
