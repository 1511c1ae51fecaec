//! Aggregation helpers behind the role dashboards.

use serde::Serialize;

use crate::assessment::RiskLevel;

/// Count of assessments per risk level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub low: i64,
    pub medium: i64,
    pub high: i64,
}

impl RiskDistribution {
    pub fn from_scores<I: IntoIterator<Item = i32>>(scores: I) -> Self {
        let mut dist = Self::default();
        for score in scores {
            match RiskLevel::from_score(score.clamp(0, 100) as u8) {
                RiskLevel::Low => dist.low += 1,
                RiskLevel::Medium => dist.medium += 1,
                RiskLevel::High => dist.high += 1,
            }
        }
        dist
    }

    pub fn total(&self) -> i64 {
        self.low + self.medium + self.high
    }
}

/// Mean rounded to one decimal place; `None` for an empty input.
pub fn mean_one_decimal<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        return None;
    }
    Some(round_one_decimal(sum / n as f64))
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
