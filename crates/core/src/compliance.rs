//! Farm-type compliance checklists and rate aggregation.
//!
//! Each farm type has a fixed ten-item checklist. A farm holds at most one
//! record per item. Items with no record are "pending": they stay in the
//! denominator of the compliance rate but never in the numerator.

use serde::Serialize;

use crate::farm::FarmType;
use crate::percent::rounded_percentage;
use crate::types::Timestamp;

/// Rates at or above this are shown as good.
pub const GOOD_RATE_MIN: u8 = 90;

/// Rates at or above this (and below [`GOOD_RATE_MIN`]) are shown as fair.
pub const FAIR_RATE_MIN: u8 = 70;

/// Maximum length of compliance notes.
pub const MAX_NOTES_LENGTH: usize = 2_000;

const PIG_CHECKLIST: &[&str] = &[
    "Biosecurity plan documented and updated",
    "Visitor access control and log maintained",
    "Vehicle disinfection protocols implemented",
    "Feed storage meets safety standards",
    "Water quality testing conducted monthly",
    "Waste management system operational",
    "Staff trained in biosecurity protocols",
    "Emergency response procedures established",
    "Record keeping system maintained",
    "Regular veterinary health checks scheduled",
];

const POULTRY_CHECKLIST: &[&str] = &[
    "Biosecurity plan documented and updated",
    "Access control measures for all entry points",
    "Footbath disinfection at farm entrance",
    "Feed storage protected from contamination",
    "Water system cleaned and tested regularly",
    "Proper disposal of dead birds",
    "Staff hygiene protocols followed",
    "Wild bird exclusion measures implemented",
    "Vaccination schedule maintained",
    "Health monitoring records updated",
];

const MIXED_CHECKLIST: &[&str] = &[
    "Comprehensive biosecurity plan for all species",
    "Species separation protocols maintained",
    "Cross-contamination prevention measures",
    "Unified visitor control system",
    "Equipment disinfection between areas",
    "Feed storage segregated by species",
    "Water quality monitoring for all systems",
    "Integrated waste management system",
    "Staff training for multi-species operations",
    "Veterinary oversight for all animals",
];

/// The checklist for a farm type, in presentation order.
pub fn checklist_for(farm_type: FarmType) -> &'static [&'static str] {
    match farm_type {
        FarmType::Pig => PIG_CHECKLIST,
        FarmType::Poultry => POULTRY_CHECKLIST,
        FarmType::Mixed => MIXED_CHECKLIST,
    }
}

/// Reject checklist text that does not belong to the farm type.
pub fn validate_checklist_item(farm_type: FarmType, item: &str) -> Result<(), String> {
    if checklist_for(farm_type).contains(&item) {
        Ok(())
    } else {
        Err(format!(
            "'{item}' is not on the {} compliance checklist",
            farm_type.as_str()
        ))
    }
}

pub fn validate_notes(notes: Option<&str>) -> Result<(), String> {
    match notes {
        Some(n) if n.chars().count() > MAX_NOTES_LENGTH => Err(format!(
            "notes must be at most {MAX_NOTES_LENGTH} characters"
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Compliant,
    NonCompliant,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceTier {
    Good,
    Fair,
    Poor,
}

impl ComplianceTier {
    pub fn from_rate(rate: u8) -> Self {
        if rate >= GOOD_RATE_MIN {
            Self::Good
        } else if rate >= FAIR_RATE_MIN {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// The stored state of one checklist item, as loaded by the repository.
#[derive(Debug, Clone)]
pub struct RecordedItem {
    pub checklist_item: String,
    pub is_compliant: bool,
    pub notes: Option<String>,
    pub checked_at: Timestamp,
}

/// One checklist line in the compliance view.
#[derive(Debug, Clone, Serialize)]
pub struct ChecklistEntry {
    pub item: &'static str,
    pub status: ItemStatus,
    pub notes: Option<String>,
    pub checked_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceSummary {
    pub total: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub pending: usize,
    pub rate: u8,
    pub tier: ComplianceTier,
}

/// Full compliance view for one farm.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub farm_type: FarmType,
    pub summary: ComplianceSummary,
    pub items: Vec<ChecklistEntry>,
}

/// Aggregate records against the farm type's checklist.
///
/// `records` may contain stale text from a different checklist; it is ignored.
pub fn build_report(farm_type: FarmType, records: &[RecordedItem]) -> ComplianceReport {
    let items: Vec<ChecklistEntry> = checklist_for(farm_type)
        .iter()
        .map(|item| {
            let record = records.iter().find(|r| r.checklist_item == *item);
            ChecklistEntry {
                item,
                status: match record {
                    Some(r) if r.is_compliant => ItemStatus::Compliant,
                    Some(_) => ItemStatus::NonCompliant,
                    None => ItemStatus::Pending,
                },
                notes: record.and_then(|r| r.notes.clone()),
                checked_at: record.map(|r| r.checked_at),
            }
        })
        .collect();

    let count = |status: ItemStatus| items.iter().filter(|e| e.status == status).count();
    let total = items.len();
    let compliant = count(ItemStatus::Compliant);
    let rate = rounded_percentage(compliant, total);

    ComplianceReport {
        farm_type,
        summary: ComplianceSummary {
            total,
            compliant,
            non_compliant: count(ItemStatus::NonCompliant),
            pending: count(ItemStatus::Pending),
            rate,
            tier: ComplianceTier::from_rate(rate),
        },
        items,
    }
}

/// Compliance rate for a farm given only the compliant item texts.
///
/// Used by dashboard aggregation where full records are not loaded.
pub fn compliance_rate(farm_type: FarmType, compliant_items: &[String]) -> u8 {
    let checklist = checklist_for(farm_type);
    let compliant = checklist
        .iter()
        .filter(|item| compliant_items.iter().any(|c| c == *item))
        .count();
    rounded_percentage(compliant, checklist.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(item: &str, is_compliant: bool) -> RecordedItem {
        RecordedItem {
            checklist_item: item.to_string(),
            is_compliant,
            notes: None,
            checked_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn every_checklist_has_ten_items() {
        for ft in [FarmType::Pig, FarmType::Poultry, FarmType::Mixed] {
            assert_eq!(checklist_for(ft).len(), 10);
        }
    }

    #[test]
    fn poultry_seven_compliant_one_non_compliant_two_pending() {
        let items = checklist_for(FarmType::Poultry);
        let mut records: Vec<_> = items[..7].iter().map(|i| record(i, true)).collect();
        records.push(record(items[7], false));

        let report = build_report(FarmType::Poultry, &records);

        assert_eq!(report.summary.rate, 70);
        assert_eq!(report.summary.compliant, 7);
        assert_eq!(report.summary.non_compliant, 1);
        assert_eq!(report.summary.pending, 2);
        assert_eq!(report.summary.tier, ComplianceTier::Fair);
        assert_eq!(report.items[8].status, ItemStatus::Pending);
        assert_eq!(report.items[7].status, ItemStatus::NonCompliant);
    }

    #[test]
    fn no_records_is_zero_and_all_pending() {
        let report = build_report(FarmType::Pig, &[]);
        assert_eq!(report.summary.rate, 0);
        assert_eq!(report.summary.pending, 10);
        assert_eq!(report.summary.tier, ComplianceTier::Poor);
    }

    #[test]
    fn rate_is_rounded_share_of_full_checklist() {
        let items = checklist_for(FarmType::Mixed);
        for k in 0..=10 {
            let records: Vec<_> = items[..k].iter().map(|i| record(i, true)).collect();
            assert_eq!(build_report(FarmType::Mixed, &records).summary.rate as usize, k * 10);
        }
    }

    #[test]
    fn foreign_checklist_text_is_ignored() {
        let records = vec![record("Proper disposal of dead birds", true)];
        let report = build_report(FarmType::Pig, &records);
        assert_eq!(report.summary.compliant, 0);
        assert_eq!(report.summary.pending, 10);
    }

    #[test]
    fn compliance_rate_from_item_texts() {
        let items: Vec<String> = checklist_for(FarmType::Pig)[..9]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(compliance_rate(FarmType::Pig, &items), 90);
        assert_eq!(ComplianceTier::from_rate(90), ComplianceTier::Good);
    }

    #[test]
    fn item_membership_is_validated() {
        assert!(
            validate_checklist_item(FarmType::Poultry, "Vaccination schedule maintained").is_ok()
        );
        assert!(validate_checklist_item(FarmType::Pig, "Vaccination schedule maintained").is_err());
    }
}
