use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Physical/biometric measurements; BMI is derived from height and weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PhysicalProfile {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub eye_color: String,
    pub hair_color: String,
    pub blood_pressure_systolic: u16,
    pub blood_pressure_diastolic: u16,
    pub resting_heart_rate: u16,
}
