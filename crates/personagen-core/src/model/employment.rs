use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One job in an employment history.
///
/// Histories are ordered by `start_date` descending and contain at most
/// one entry with `is_current`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Employment {
    pub employer: String,
    pub job_title: String,
    pub industry: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub annual_salary: f64,
    /// Contract positions may overlap neighbouring jobs.
    pub is_contract: bool,
}
