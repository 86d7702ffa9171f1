use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lifestyle archetype selected from age and income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleCategory {
    Minimalist,
    Luxury,
    Outdoorsy,
    Urban,
    Suburban,
    Rural,
    Bohemian,
    Traditional,
    Modern,
    TechSavvy,
}

/// Big-Five personality traits on a 1-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BigFive {
    pub openness: u8,
    pub conscientiousness: u8,
    pub extraversion: u8,
    pub agreeableness: u8,
    pub neuroticism: u8,
}

/// Daily schedule archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DailyRoutine {
    pub archetype: String,
    pub wake_time: String,
    pub bed_time: String,
    pub productivity_peak: String,
}

/// Personality, habits and wellbeing scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LifestyleProfile {
    pub category: LifestyleCategory,
    pub big_five: BigFive,
    /// Four-letter type derived from the Big-Five thresholds.
    pub mbti: String,
    pub hobbies: Vec<String>,
    pub favorite_foods: Vec<String>,
    pub core_values: Vec<String>,
    pub music_genres: Vec<String>,
    pub devices: Vec<String>,
    pub tech_adoption: String,
    pub routine: DailyRoutine,
    pub shopping_pattern: String,
    /// 1-10.
    pub life_satisfaction: u8,
    /// 1-10; moves inversely to satisfaction.
    pub stress_level: u8,
    /// 1-10.
    pub work_life_balance: u8,
    pub future_goals: Vec<String>,
}
