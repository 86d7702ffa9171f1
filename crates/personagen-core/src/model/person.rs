use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    Address, AddressType, BankingProfile, CommunicationProfile, EducationProfile, EmailAddress,
    Employment, FinancialProfile, LegalProfile, LifestyleProfile, MedicalProfile, OnlinePresence,
    PhoneNumber, PhysicalProfile, TravelProfile, VehicleProfile,
};

/// Gender drawn at the start of composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    Unknown,
}

/// Marital status; feeds lifestyle satisfaction and relationship derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
    Partnership,
}

/// Cultural background steering the name pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CulturalBackground {
    Anglo,
    Hispanic,
    African,
    Asian,
    Other,
}

/// Name components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PersonName {
    pub first: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
    pub last: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maiden_name: Option<String>,
}

impl PersonName {
    /// "First Last", ignoring decorations.
    pub fn full(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

/// The aggregate root produced by one composition run.
///
/// Invariants established at construction: exactly one current address when
/// any address exists, at most one primary phone and email, at most one
/// current job, employment sorted by start date descending. Persons are
/// never mutated after construction; relatives are new instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Person {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    pub name: PersonName,
    pub date_of_birth: NaiveDate,
    /// Age in whole years at generation time.
    pub age: u32,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub cultural_background: CulturalBackground,
    pub addresses: Vec<Address>,
    pub phone_numbers: Vec<PhoneNumber>,
    pub email_addresses: Vec<EmailAddress>,
    pub employment_history: Vec<Employment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial: Option<FinancialProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical: Option<MedicalProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<VehicleProfile>,
    pub education: EducationProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_presence: Option<OnlinePresence>,
    pub physical: PhysicalProfile,
    pub lifestyle: LifestyleProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel: Option<TravelProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banking: Option<BankingProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication: Option<CommunicationProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal: Option<LegalProfile>,
}

impl Person {
    pub fn current_address(&self) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|address| address.address_type == AddressType::Current)
    }

    pub fn primary_phone(&self) -> Option<&PhoneNumber> {
        self.phone_numbers.iter().find(|phone| phone.is_primary)
    }

    pub fn primary_email(&self) -> Option<&EmailAddress> {
        self.email_addresses.iter().find(|email| email.is_primary)
    }

    pub fn current_employment(&self) -> Option<&Employment> {
        self.employment_history.iter().find(|job| job.is_current)
    }

    /// State of the current address, when known.
    pub fn current_state(&self) -> Option<&str> {
        self.current_address().map(|address| address.state.as_str())
    }
}
