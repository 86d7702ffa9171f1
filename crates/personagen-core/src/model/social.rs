use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How active the person is online; drives account counts and post volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// One social media account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SocialMediaAccount {
    pub platform: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub followers: u32,
    pub following: u32,
    pub posts: u32,
    /// Percentage, capped at 20.0.
    pub engagement_rate: f64,
    pub account_created: NaiveDate,
    pub is_private: bool,
    pub is_verified: bool,
}

/// A non-social online account (streaming, shopping, finance, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OnlineAccount {
    pub service: String,
    pub category: String,
    pub username: String,
    pub created: NaiveDate,
}

/// Trace data a person leaves across services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DigitalFootprint {
    pub primary_email_domain: String,
    pub backup_emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masked_phone: Option<String>,
    pub data_breach_count: u8,
}

/// Aggregate online presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OnlinePresence {
    pub social_media: Vec<SocialMediaAccount>,
    pub online_accounts: Vec<OnlineAccount>,
    pub digital_footprint: DigitalFootprint,
    pub activity_level: ActivityLevel,
    /// 1-10 scale; higher for younger and tech-adjacent occupations.
    pub tech_savviness: u8,
}
