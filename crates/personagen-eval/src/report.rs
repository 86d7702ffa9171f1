//! Report types for batch evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contract version for the report format.
pub const REPORT_VERSION: &str = "0.1";

/// Counts of structural invariant violations across the batch. All zero on
/// a healthy batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantCounts {
    /// People with addresses but not exactly one marked current.
    pub current_address: u64,
    /// People with more than one primary phone.
    pub primary_phone: u64,
    /// People with more than one primary email.
    pub primary_email: u64,
    /// People with more than one current job or unsorted history.
    pub employment: u64,
    /// Credit scores outside [300, 850].
    pub credit_score_range: u64,
    /// Debt-to-income outside [0, 10] or utilization outside [0, 1].
    pub financial_ratio: u64,
    /// Birth dates in the future or implying an age over the table maximum.
    pub birth_date: u64,
    /// Duplicate person ids.
    pub duplicate_id: u64,
}

impl InvariantCounts {
    pub fn is_clean(&self) -> bool {
        self.current_address == 0
            && self.primary_phone == 0
            && self.primary_email == 0
            && self.employment == 0
            && self.credit_score_range == 0
            && self.financial_ratio == 0
            && self.birth_date == 0
            && self.duplicate_id == 0
    }

    pub fn total(&self) -> u64 {
        self.current_address
            + self.primary_phone
            + self.primary_email
            + self.employment
            + self.credit_score_range
            + self.financial_ratio
            + self.birth_date
            + self.duplicate_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderBreakdown {
    pub male: u64,
    pub female: u64,
    pub other: u64,
    pub unknown: u64,
}

impl GenderBreakdown {
    /// Whether male and female counts are within `tolerance` of balanced,
    /// as a fraction of their combined total.
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        let total = self.male + self.female;
        if total == 0 {
            return true;
        }
        let share = self.male as f64 / total as f64;
        (share - 0.5).abs() <= tolerance / 2.0
    }
}

/// Min/mean/max over one numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl NumericSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &value in values {
            min = min.min(value);
            max = max.max(value);
            sum += value;
        }
        Some(Self {
            min,
            max,
            mean: sum / values.len() as f64,
        })
    }
}

/// Full evaluation of one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub report_version: String,
    pub generated_at: DateTime<Utc>,
    pub record_count: u64,
    pub invariants: InvariantCounts,
    pub gender: GenderBreakdown,
    pub age: NumericSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<NumericSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<NumericSummary>,
    /// Mean credit score of the upper income half minus the lower half.
    /// Positive values confirm the income/credit correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_credit_gap: Option<f64>,
    /// Observed fraction of people with a null SSN.
    pub ssn_missing_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_invariants_are_clean() {
        let counts = InvariantCounts::default();
        assert!(counts.is_clean());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn balance_tolerance() {
        let even = GenderBreakdown { male: 500, female: 500, other: 3, unknown: 2 };
        assert!(even.is_balanced(0.30));
        let skewed = GenderBreakdown { male: 900, female: 100, other: 0, unknown: 0 };
        assert!(!skewed.is_balanced(0.30));
    }

    #[test]
    fn numeric_summary_of_empty_is_none() {
        assert!(NumericSummary::from_values(&[]).is_none());
        let summary = NumericSummary::from_values(&[1.0, 3.0]).unwrap();
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
        assert_eq!(summary.mean, 2.0);
    }
}
