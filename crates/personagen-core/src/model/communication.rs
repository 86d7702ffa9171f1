use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Relationship of a contact-book entry to the person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContactRelationship {
    Partner,
    Family,
    Friend,
    Coworker,
    Professional,
    Acquaintance,
}

/// One contact-book entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContactEntry {
    pub name: String,
    pub relationship: ContactRelationship,
    /// 1-10.
    pub closeness: u8,
    /// 1-10; weights contact selection for records.
    pub frequency: u8,
    pub preferred_platform: String,
    pub is_emergency: bool,
    pub is_blocked: bool,
}

/// One call/message/email event in the 90-day window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CommunicationRecord {
    pub timestamp: NaiveDateTime,
    /// Index into the profile's contact list.
    pub contact_index: usize,
    pub kind: String,
    pub direction: String,
    pub platform: String,
    /// Calls only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    /// Texts and emails only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_length: Option<u32>,
    /// Group conversations only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_size: Option<u8>,
}

/// Aggregates derived from the record window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CommunicationPattern {
    pub avg_daily_messages: f64,
    pub avg_daily_calls: f64,
    /// Hours of day (0-23) ranked by traffic.
    pub preferred_hours: Vec<u8>,
    pub top_platforms: Vec<String>,
    pub style: String,
}

/// Contact graph plus communication log and derived patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CommunicationProfile {
    pub contacts: Vec<ContactEntry>,
    pub records: Vec<CommunicationRecord>,
    pub pattern: CommunicationPattern,
    /// Fraction of outgoing attempts that connected.
    pub success_rate: f64,
}
