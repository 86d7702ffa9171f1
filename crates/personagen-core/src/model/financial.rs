use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Credit and debt posture derived from age, income and employment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FinancialProfile {
    /// FICO-style score, always within [300, 850].
    pub credit_score: u16,
    pub annual_income: f64,
    /// Total annual debt service divided by income, within [0, 10].
    pub debt_to_income_ratio: f64,
    pub total_debt: f64,
    pub mortgage_debt: f64,
    pub auto_debt: f64,
    pub student_debt: f64,
    pub credit_card_debt: f64,
    pub other_debt: f64,
    /// Card balance over available credit, within [0, 1].
    pub credit_utilization: f64,
    pub available_credit: f64,
    pub bankruptcy_history: bool,
}
