use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a vehicle is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VehicleOwnership {
    Owned,
    Financed,
    Leased,
}

/// One vehicle registered to the person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Vehicle {
    pub year: u16,
    pub make: String,
    pub model: String,
    /// 17-character VIN-shaped identifier (not checksum-valid).
    pub vin: String,
    pub license_plate: String,
    /// Registration state.
    pub state: String,
    pub color: String,
    pub ownership: VehicleOwnership,
    pub estimated_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<f64>,
}

/// Vehicles plus licensing status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VehicleProfile {
    pub vehicles: Vec<Vehicle>,
    pub has_drivers_license: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
}
