use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Bank account categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BankAccountType {
    Checking,
    Savings,
    Investment,
}

/// One bank or brokerage account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BankAccount {
    pub bank: String,
    pub account_type: BankAccountType,
    pub balance: f64,
    /// Annual percent, for interest-bearing accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    pub opened: NaiveDate,
}

/// Whether money moved in or out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionDirection {
    Credit,
    Debit,
}

/// One transaction on the checking account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub merchant: String,
    pub method: String,
    pub direction: TransactionDirection,
    /// Running balance after this transaction posted.
    pub balance_after: f64,
    pub recurring: bool,
}

/// One investment holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Investment {
    pub symbol: String,
    pub kind: String,
    pub quantity: f64,
    pub purchase_value: f64,
    pub current_value: f64,
}

/// Loan categories carried by the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoanKind {
    Mortgage,
    Auto,
    Student,
}

/// One amortized loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Loan {
    pub kind: LoanKind,
    pub principal: f64,
    pub remaining_balance: f64,
    /// Annual percent.
    pub interest_rate: f64,
    pub term_months: u32,
    pub monthly_payment: f64,
    pub originated: NaiveDate,
}

/// One credit card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CreditCard {
    pub issuer: String,
    pub credit_limit: f64,
    pub balance: f64,
    pub minimum_payment: f64,
    pub apr: f64,
    pub annual_fee: f64,
}

/// Full banking picture: accounts, activity, debt and goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BankingProfile {
    pub accounts: Vec<BankAccount>,
    /// Six months of checking activity, oldest first.
    pub transactions: Vec<Transaction>,
    pub investments: Vec<Investment>,
    pub loans: Vec<Loan>,
    pub credit_cards: Vec<CreditCard>,
    /// Assets minus liabilities; may be negative.
    pub net_worth: f64,
    pub financial_goals: Vec<String>,
    pub risk_tolerance: String,
}
