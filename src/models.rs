use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Activity level chosen during onboarding.
///
/// Stored values outside the known set load as `Unrecognized` instead of
/// failing the whole profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// Centimeters.
    pub height: f64,
    /// Kilograms, as entered during onboarding.
    pub start_weight: f64,
    /// Kilograms, overwritten by each logged weight.
    pub current_weight: f64,
    pub goal_weight: f64,
    /// Months.
    pub goal_duration: u32,
    pub activity_level: ActivityLevel,
    pub start_date: DateTime<Utc>,
}

/// Identity of a meal or workout entry, unique across the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: EntryId,
    pub name: String,
    pub calories: u32,
    #[serde(rename = "type")]
    pub kind: MealType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: EntryId,
    pub name: String,
    /// Minutes.
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A meal as submitted, before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMeal {
    pub name: String,
    pub calories: u32,
    #[serde(rename = "type")]
    pub kind: MealType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    pub name: String,
    pub duration: u32,
    #[serde(rename = "type", default = "default_workout_kind")]
    pub kind: String,
}

fn default_workout_kind() -> String {
    "cardio".to_string()
}

/// Everything recorded for one calendar day.
///
/// `calories` and `exercise` are running totals of `meals` and `workouts`.
/// Only the store's append operations change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Milliliters.
    pub water: u32,
    pub calories: u64,
    /// Minutes.
    pub exercise: u64,
    #[serde(default)]
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub workouts: Vec<Workout>,
}

impl DailyLog {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            weight: None,
            water: 0,
            calories: 0,
            exercise: 0,
            meals: Vec::new(),
            workouts: Vec::new(),
        }
    }
}

/// Direct overwrites for a daily log. `None` leaves the field untouched.
///
/// Totals and entry lists cannot be patched; they only move through
/// `add_meal` / `add_workout`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogPatch {
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub water: Option<u32>,
}

impl LogPatch {
    pub fn water(ml: u32) -> Self {
        Self {
            water: Some(ml),
            ..Self::default()
        }
    }

    pub fn weight(kg: f64) -> Self {
        Self {
            weight: Some(kg),
            ..Self::default()
        }
    }
}

pub type Logs = BTreeMap<NaiveDate, DailyLog>;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub start_weight: f64,
    pub goal_weight: f64,
    pub goal_duration: u32,
    pub activity_level: ActivityLevel,
}

#[derive(Debug, Deserialize)]
pub struct WaterRequest {
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct WeightRequest {
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub value: u64,
    pub target: u64,
    pub remaining: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightPoint {
    pub label: String,
    pub date: Option<NaiveDate>,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub date: NaiveDate,
    pub name: String,
    pub day_number: i64,
    pub goal_weight: f64,
    pub current_weight: f64,
    /// Positive when weight was lost since the start.
    pub weight_lost: f64,
    pub calories: Progress,
    pub water: Progress,
    pub exercise: Progress,
    pub next_milestone: f64,
    pub recent_weights: Vec<WeightPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightResponse {
    pub current_weight: f64,
    pub goal_weight: f64,
    pub left_to_goal: f64,
    pub trend: Vec<WeightPoint>,
}
