use chrono::{NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How often the person travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TravelFrequency {
    Rare,
    Occasional,
    Moderate,
    Frequent,
}

/// One trip taken in the last two years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TravelEntry {
    pub destination_city: String,
    /// State for domestic trips, country otherwise.
    pub destination_region: String,
    pub international: bool,
    pub purpose: String,
    pub transport: String,
    pub accommodation: String,
    pub departure: NaiveDate,
    pub duration_days: u8,
    pub total_cost: f64,
    /// Two uppercase letters followed by four digits.
    pub booking_reference: String,
    /// Zero when travelling alone.
    pub companions: u8,
}

/// One stop in the 30-day location history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocationVisit {
    pub location_type: String,
    pub name: String,
    pub visited_at: NaiveDateTime,
    pub duration_minutes: u32,
    pub expense: f64,
}

/// Travel habits, recent trips and local movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TravelProfile {
    pub frequency: TravelFrequency,
    pub style: String,
    pub total_trips: u32,
    pub passport: bool,
    pub countries_visited: Vec<String>,
    pub loyalty_programs: Vec<String>,
    pub recent_trips: Vec<TravelEntry>,
    /// Sorted by `visited_at` descending.
    pub location_history: Vec<LocationVisit>,
}
