use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether an address is the person's current one or a prior residence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    Current,
    Previous,
}

/// Synthesis style of the address line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AddressStyle {
    Standard,
    PoBox,
    RuralRoute,
    Military,
}

/// One residence in a person's address history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Address {
    pub id: Uuid,
    pub street_line1: String,
    /// Apartment/unit line, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_line2: Option<String>,
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    pub zip_code: String,
    pub address_type: AddressType,
    pub style: AddressStyle,
    /// Date the person moved in.
    pub effective_date: NaiveDate,
    /// Date the person moved out; open-ended for the current address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}
