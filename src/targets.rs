//! Daily targets derived from the profile. Nothing here is stored; every
//! value is recomputed from the current profile on read.

use crate::models::{ActivityLevel, Gender, UserProfile};
use chrono::{DateTime, Utc};

pub const CALORIE_DEFICIT: f64 = 500.0;
pub const WATER_TARGET_ML: u32 = 2500;
pub const EXERCISE_GOAL_MINUTES: u32 = 30;

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate | ActivityLevel::Unrecognized => 1.55,
            ActivityLevel::Active => 1.725,
        }
    }
}

impl Gender {
    fn bmr_offset(self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female | Gender::Other => -161.0,
        }
    }
}

/// Basal metabolic rate (Mifflin-St Jeor) from the profile's current weight.
pub fn bmr(profile: &UserProfile) -> f64 {
    10.0 * profile.current_weight + 6.25 * profile.height - 5.0 * f64::from(profile.age)
        + profile.gender.bmr_offset()
}

pub fn tdee(profile: &UserProfile) -> f64 {
    bmr(profile) * profile.activity_level.multiplier()
}

/// Daily calorie target: TDEE minus a fixed deficit, rounded.
pub fn calorie_target(profile: &UserProfile) -> u32 {
    let target = (tdee(profile) - CALORIE_DEFICIT).round();
    if target <= 0.0 { 0 } else { target as u32 }
}

/// Day N of the program, counting from 1.
pub fn day_number(profile: &UserProfile, now: DateTime<Utc>) -> i64 {
    (now - profile.start_date).num_days().max(1)
}

/// Percentage of `target` reached, capped at 100.
pub fn percent_of(value: u64, target: u64) -> f64 {
    if target == 0 {
        return 100.0;
    }
    (value as f64 / target as f64 * 100.0).min(100.0)
}
