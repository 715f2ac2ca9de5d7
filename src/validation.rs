//! Range checks applied to user input before it reaches the store.

use crate::models::{ActivityLevel, NewMeal, NewWorkout, OnboardingRequest, UserProfile};
use chrono::{DateTime, NaiveDate, Utc};
use std::ops::RangeInclusive;
use thiserror::Error;

const AGE_RANGE: RangeInclusive<u32> = 10..=100;
const HEIGHT_RANGE_CM: RangeInclusive<f64> = 100.0..=250.0;
const WEIGHT_RANGE_KG: RangeInclusive<f64> = 30.0..=300.0;
const GOAL_DURATION_RANGE_MONTHS: RangeInclusive<u32> = 1..=24;
const MIN_NAME_CHARS: usize = 2;
const MAX_MEAL_CALORIES: u32 = 10_000;
const MAX_WORKOUT_MINUTES: u32 = 24 * 60;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: u32 },
    #[error("activity level is not recognized")]
    UnknownActivityLevel,
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Builds the initial profile from the onboarding answers.
///
/// The current weight starts at the start weight and the program starts at
/// `now`.
pub fn profile_from_onboarding(
    request: OnboardingRequest,
    now: DateTime<Utc>,
) -> Result<UserProfile, ValidationError> {
    let profile = UserProfile {
        name: request.name.trim().to_string(),
        age: request.age,
        gender: request.gender,
        height: request.height,
        start_weight: request.start_weight,
        current_weight: request.start_weight,
        goal_weight: request.goal_weight,
        goal_duration: request.goal_duration,
        activity_level: request.activity_level,
        start_date: now,
    };
    validate_profile(&profile)?;
    Ok(profile)
}

pub fn validate_profile(profile: &UserProfile) -> Result<(), ValidationError> {
    if profile.name.trim().chars().count() < MIN_NAME_CHARS {
        return Err(ValidationError::Required { field: "name" });
    }
    check_range("age", f64::from(profile.age), &to_f64(&AGE_RANGE))?;
    check_range("height", profile.height, &HEIGHT_RANGE_CM)?;
    check_range("startWeight", profile.start_weight, &WEIGHT_RANGE_KG)?;
    check_range("currentWeight", profile.current_weight, &WEIGHT_RANGE_KG)?;
    check_range("goalWeight", profile.goal_weight, &WEIGHT_RANGE_KG)?;
    check_range(
        "goalDuration",
        f64::from(profile.goal_duration),
        &to_f64(&GOAL_DURATION_RANGE_MONTHS),
    )?;
    if profile.activity_level == ActivityLevel::Unrecognized {
        return Err(ValidationError::UnknownActivityLevel);
    }
    Ok(())
}

pub fn validate_meal(meal: &NewMeal) -> Result<(), ValidationError> {
    if meal.name.trim().is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }
    check_amount("calories", meal.calories, MAX_MEAL_CALORIES)
}

pub fn validate_workout(workout: &NewWorkout) -> Result<(), ValidationError> {
    if workout.name.trim().is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }
    check_amount("duration", workout.duration, MAX_WORKOUT_MINUTES)
}

pub fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    check_range("weight", weight, &WEIGHT_RANGE_KG)
}

pub fn validate_water_delta(amount: i64) -> Result<(), ValidationError> {
    if amount == 0 {
        return Err(ValidationError::Required { field: "amount" });
    }
    Ok(())
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .filter(|date| date.format("%Y-%m-%d").to_string() == raw)
        .ok_or_else(|| ValidationError::InvalidDate(raw.to_string()))
}

fn check_range(
    field: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), ValidationError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

fn check_amount(field: &'static str, value: u32, max: u32) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::NotPositive { field });
    }
    if value > max {
        return Err(ValidationError::TooLarge { field, max });
    }
    Ok(())
}

fn to_f64(range: &RangeInclusive<u32>) -> RangeInclusive<f64> {
    f64::from(*range.start())..=f64::from(*range.end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, MealType};
    use chrono::TimeZone;

    fn request() -> OnboardingRequest {
        OnboardingRequest {
            name: "  Sam ".to_string(),
            age: 27,
            gender: Gender::Male,
            height: 180.0,
            start_weight: 86.0,
            goal_weight: 80.0,
            goal_duration: 2,
            activity_level: ActivityLevel::Moderate,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn onboarding_sets_derived_fields() {
        let profile = profile_from_onboarding(request(), now()).unwrap();
        assert_eq!(profile.name, "Sam");
        assert_eq!(profile.current_weight, 86.0);
        assert_eq!(profile.start_date, now());
    }

    #[test]
    fn onboarding_rejects_out_of_range_values() {
        let mut short_name = request();
        short_name.name = " A ".to_string();
        assert_eq!(
            profile_from_onboarding(short_name, now()),
            Err(ValidationError::Required { field: "name" })
        );

        let mut young = request();
        young.age = 9;
        assert!(matches!(
            profile_from_onboarding(young, now()),
            Err(ValidationError::OutOfRange { field: "age", .. })
        ));

        let mut tall = request();
        tall.height = 251.0;
        assert!(matches!(
            profile_from_onboarding(tall, now()),
            Err(ValidationError::OutOfRange { field: "height", .. })
        ));

        let mut long_goal = request();
        long_goal.goal_duration = 25;
        assert!(matches!(
            profile_from_onboarding(long_goal, now()),
            Err(ValidationError::OutOfRange {
                field: "goalDuration",
                ..
            })
        ));

        let mut unknown = request();
        unknown.activity_level = ActivityLevel::Unrecognized;
        assert_eq!(
            profile_from_onboarding(unknown, now()),
            Err(ValidationError::UnknownActivityLevel)
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut edge = request();
        edge.age = 100;
        edge.height = 100.0;
        edge.start_weight = 300.0;
        edge.goal_weight = 30.0;
        edge.goal_duration = 24;
        assert!(profile_from_onboarding(edge, now()).is_ok());
    }

    #[test]
    fn meal_and_workout_need_name_and_amount() {
        let meal = NewMeal {
            name: " ".to_string(),
            calories: 200,
            kind: MealType::Snack,
        };
        assert!(validate_meal(&meal).is_err());
        let meal = NewMeal {
            name: "Apple".to_string(),
            calories: 0,
            kind: MealType::Snack,
        };
        assert_eq!(
            validate_meal(&meal),
            Err(ValidationError::NotPositive { field: "calories" })
        );

        let workout = NewWorkout {
            name: "Row".to_string(),
            duration: 15,
            kind: "strength".to_string(),
        };
        assert!(validate_workout(&workout).is_ok());
    }

    #[test]
    fn meal_and_workout_amounts_are_capped() {
        let meal = NewMeal {
            name: "Feast".to_string(),
            calories: 10_000,
            kind: MealType::Dinner,
        };
        assert!(validate_meal(&meal).is_ok());
        let meal = NewMeal {
            calories: u32::MAX,
            ..meal
        };
        assert_eq!(
            validate_meal(&meal),
            Err(ValidationError::TooLarge {
                field: "calories",
                max: 10_000
            })
        );

        let workout = NewWorkout {
            name: "Ultra".to_string(),
            duration: 1_440,
            kind: "cardio".to_string(),
        };
        assert!(validate_workout(&workout).is_ok());
        let workout = NewWorkout {
            duration: 1_441,
            ..workout
        };
        assert_eq!(
            validate_workout(&workout),
            Err(ValidationError::TooLarge {
                field: "duration",
                max: 1_440
            })
        );
    }

    #[test]
    fn weight_and_water_checks() {
        assert!(validate_weight(29.9).is_err());
        assert!(validate_weight(84.2).is_ok());
        assert!(validate_water_delta(0).is_err());
        assert!(validate_water_delta(-250).is_ok());
    }

    #[test]
    fn dates_must_be_canonical() {
        assert_eq!(
            parse_date("2026-03-09").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
        );
        assert!(parse_date("2026-3-9").is_err());
        assert!(parse_date("2026-02-30").is_err());
        assert!(parse_date("today").is_err());
    }
}
