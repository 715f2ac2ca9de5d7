//! Read-side summaries over the profile and logs: today's dashboard and the
//! weight trend.

use crate::models::{DashboardResponse, Logs, Progress, UserProfile, WeightPoint, WeightResponse};
use crate::targets::{
    EXERCISE_GOAL_MINUTES, WATER_TARGET_ML, calorie_target, day_number, percent_of,
};
use chrono::{DateTime, NaiveDate, Utc};

const RECENT_WEIGHT_DAYS: usize = 7;
const START_LABEL: &str = "Start";

pub fn build_dashboard_at(
    today: NaiveDate,
    now: DateTime<Utc>,
    profile: &UserProfile,
    logs: &Logs,
) -> DashboardResponse {
    let log = logs.get(&today);
    let calories = log.map_or(0, |log| log.calories);
    let water = log.map_or(0, |log| u64::from(log.water));
    let exercise = log.map_or(0, |log| log.exercise);

    DashboardResponse {
        date: today,
        name: profile.name.clone(),
        day_number: day_number(profile, now),
        goal_weight: profile.goal_weight,
        current_weight: profile.current_weight,
        weight_lost: profile.start_weight - profile.current_weight,
        calories: progress(calories, u64::from(calorie_target(profile))),
        water: progress(water, u64::from(WATER_TARGET_ML)),
        exercise: progress(exercise, u64::from(EXERCISE_GOAL_MINUTES)),
        next_milestone: profile.current_weight - 1.0,
        recent_weights: recent_weights(profile, logs),
    }
}

pub fn build_weight_view(profile: &UserProfile, logs: &Logs) -> WeightResponse {
    WeightResponse {
        current_weight: profile.current_weight,
        goal_weight: profile.goal_weight,
        left_to_goal: profile.current_weight - profile.goal_weight,
        trend: weight_trend(profile, logs),
    }
}

/// The start weight followed by every logged weight, oldest first.
pub fn weight_trend(profile: &UserProfile, logs: &Logs) -> Vec<WeightPoint> {
    let start = WeightPoint {
        label: START_LABEL.to_string(),
        date: None,
        weight: profile.start_weight,
    };
    std::iter::once(start)
        .chain(logs.values().filter_map(|log| {
            log.weight.map(|weight| WeightPoint {
                label: date_label(log.date),
                date: Some(log.date),
                weight,
            })
        }))
        .collect()
}

/// One point per recent log, filling days without a weigh-in with the
/// current weight.
fn recent_weights(profile: &UserProfile, logs: &Logs) -> Vec<WeightPoint> {
    if logs.is_empty() {
        return vec![WeightPoint {
            label: START_LABEL.to_string(),
            date: None,
            weight: profile.start_weight,
        }];
    }

    let skip = logs.len().saturating_sub(RECENT_WEIGHT_DAYS);
    logs.values()
        .skip(skip)
        .map(|log| WeightPoint {
            label: date_label(log.date),
            date: Some(log.date),
            weight: log.weight.unwrap_or(profile.current_weight),
        })
        .collect()
}

fn progress(value: u64, target: u64) -> Progress {
    Progress {
        value,
        target,
        remaining: target.saturating_sub(value),
        percent: percent_of(value, target),
    }
}

fn date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}
