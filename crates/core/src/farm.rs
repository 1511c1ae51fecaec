//! Farm types and farm field validation.

use serde::{Deserialize, Serialize};

pub const FARM_TYPE_PIG: &str = "pig";
pub const FARM_TYPE_POULTRY: &str = "poultry";
pub const FARM_TYPE_MIXED: &str = "mixed";

pub const VALID_FARM_TYPES: &[&str] = &[FARM_TYPE_PIG, FARM_TYPE_POULTRY, FARM_TYPE_MIXED];

/// Upper bound on a registered herd/flock size.
pub const MAX_ANIMAL_COUNT: i32 = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FarmType {
    Pig,
    Poultry,
    Mixed,
}

impl FarmType {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            FARM_TYPE_PIG => Ok(Self::Pig),
            FARM_TYPE_POULTRY => Ok(Self::Poultry),
            FARM_TYPE_MIXED => Ok(Self::Mixed),
            _ => Err(format!(
                "Invalid farm type '{s}'. Must be one of: {}",
                VALID_FARM_TYPES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pig => FARM_TYPE_PIG,
            Self::Poultry => FARM_TYPE_POULTRY,
            Self::Mixed => FARM_TYPE_MIXED,
        }
    }
}

/// Validate an optional animal count.
pub fn validate_animal_count(count: Option<i32>) -> Result<(), String> {
    match count {
        Some(n) if n < 0 => Err("animal_count must not be negative".to_string()),
        Some(n) if n > MAX_ANIMAL_COUNT => Err(format!(
            "animal_count must not exceed {MAX_ANIMAL_COUNT}"
        )),
        _ => Ok(()),
    }
}

/// Validate an optional farm size in hectares.
pub fn validate_size_hectares(size: Option<f64>) -> Result<(), String> {
    match size {
        Some(s) if !s.is_finite() || s < 0.0 => {
            Err("size_hectares must be a non-negative number".to_string())
        }
        _ => Ok(()),
    }
}
