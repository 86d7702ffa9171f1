use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Severity of a legal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// One court or administrative record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LegalRecord {
    pub record_type: String,
    pub title: String,
    /// "YYYY-NNNNNN".
    pub case_number: String,
    pub filed: NaiveDate,
    pub status: String,
    pub severity: Severity,
    pub financial_impact: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

/// Compliance standing for one regulatory area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceRecord {
    pub area: String,
    pub regulation: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_audit: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation_plan: Option<String>,
}

/// One professional license.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProfessionalLicense {
    pub license_type: String,
    pub number: String,
    pub issued: NaiveDate,
    pub expires: NaiveDate,
    pub status: String,
    pub continuing_education_hours: u8,
    pub disciplinary_action: bool,
}

/// One registered business entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BusinessEntity {
    pub name: String,
    pub entity_type: String,
    pub state: String,
    /// "NN-NNNNNNN".
    pub tax_id: String,
    pub active: bool,
}

/// One patent/trademark/copyright filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IntellectualProperty {
    pub kind: String,
    pub title: String,
    pub filed: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<NaiveDate>,
}

/// Legal history, compliance standing and derived risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LegalProfile {
    pub legal_records: Vec<LegalRecord>,
    pub compliance: Vec<ComplianceRecord>,
    pub licenses: Vec<ProfessionalLicense>,
    pub businesses: Vec<BusinessEntity>,
    pub intellectual_property: Vec<IntellectualProperty>,
    pub background_check_clear: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_clearance: Option<String>,
    /// 0-100, higher is riskier.
    pub risk_score: u8,
}
