use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of phone line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PhoneType {
    Mobile,
    Home,
    Work,
}

/// One phone number; at most one per person is primary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PhoneNumber {
    /// Rendered number; format may drift per the data-quality profile.
    pub number: String,
    pub phone_type: PhoneType,
    pub is_primary: bool,
    pub can_receive_sms: bool,
}

/// Kind of email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmailType {
    Personal,
    Work,
}

/// One email address; at most one per person is primary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmailAddress {
    pub address: String,
    pub email_type: EmailType,
    pub is_primary: bool,
    pub is_verified: bool,
}
