use crate::dashboard::{build_dashboard_at, build_weight_view};
use crate::errors::AppError;
use crate::models::{
    DailyLog, DashboardResponse, LogPatch, Logs, Meal, NewMeal, NewWorkout, OnboardingRequest,
    UserProfile, WaterRequest, WeightRequest, WeightResponse, Workout,
};
use crate::state::AppState;
use crate::storage::FileStorage;
use crate::store::Store;
use crate::validation::{
    parse_date, profile_from_onboarding, validate_meal, validate_profile, validate_water_delta,
    validate_weight, validate_workout,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Local, NaiveDate, Utc};

pub async fn get_profile(State(state): State<AppState>) -> Json<Option<UserProfile>> {
    let store = state.store.lock().await;
    Json(store.profile().cloned())
}

pub async fn onboard(
    State(state): State<AppState>,
    Json(payload): Json<OnboardingRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let profile = profile_from_onboarding(payload, Utc::now())?;
    let mut store = state.store.lock().await;
    store.set_profile(profile.clone());
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn put_profile(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<UserProfile>, AppError> {
    validate_profile(&profile)?;
    let mut store = state.store.lock().await;
    store.set_profile(profile.clone());
    Ok(Json(profile))
}

pub async fn reset(State(state): State<AppState>) -> StatusCode {
    state.store.lock().await.reset();
    StatusCode::NO_CONTENT
}

pub async fn get_logs(State(state): State<AppState>) -> Result<Json<Logs>, AppError> {
    let store = state.store.lock().await;
    require_profile(&store)?;
    Ok(Json(store.logs().clone()))
}

pub async fn get_log(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DailyLog>, AppError> {
    let date = parse_date(&date)?;
    let store = state.store.lock().await;
    require_profile(&store)?;
    Ok(Json(store.log_or_empty(date)))
}

pub async fn patch_log(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(patch): Json<LogPatch>,
) -> Result<Json<DailyLog>, AppError> {
    let date = parse_date(&date)?;
    if let Some(weight) = patch.weight {
        validate_weight(weight)?;
    }
    let mut store = state.store.lock().await;
    require_profile(&store)?;
    Ok(Json(store.update_log(date, patch)))
}

pub async fn add_meal(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(meal): Json<NewMeal>,
) -> Result<(StatusCode, Json<Meal>), AppError> {
    let date = parse_date(&date)?;
    validate_meal(&meal)?;
    let mut store = state.store.lock().await;
    require_profile(&store)?;
    Ok((StatusCode::CREATED, Json(store.add_meal(date, meal))))
}

pub async fn add_workout(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(workout): Json<NewWorkout>,
) -> Result<(StatusCode, Json<Workout>), AppError> {
    let date = parse_date(&date)?;
    validate_workout(&workout)?;
    let mut store = state.store.lock().await;
    require_profile(&store)?;
    Ok((StatusCode::CREATED, Json(store.add_workout(date, workout))))
}

pub async fn add_water(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<WaterRequest>,
) -> Result<Json<DailyLog>, AppError> {
    let date = parse_date(&date)?;
    validate_water_delta(payload.amount)?;
    let mut store = state.store.lock().await;
    require_profile(&store)?;
    Ok(Json(store.add_water(date, payload.amount)))
}

pub async fn log_weight(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<WeightRequest>,
) -> Result<Json<DailyLog>, AppError> {
    let date = parse_date(&date)?;
    validate_weight(payload.weight)?;
    let mut store = state.store.lock().await;
    require_profile(&store)?;
    Ok(Json(store.log_weight(date, payload.weight)))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let store = state.store.lock().await;
    let profile = require_profile(&store)?;
    Ok(Json(build_dashboard_at(
        today(),
        Utc::now(),
        profile,
        store.logs(),
    )))
}

pub async fn get_weight(State(state): State<AppState>) -> Result<Json<WeightResponse>, AppError> {
    let store = state.store.lock().await;
    let profile = require_profile(&store)?;
    Ok(Json(build_weight_view(profile, store.logs())))
}

pub async fn not_found() -> AppError {
    AppError::not_found("no such route")
}

fn require_profile(store: &Store<FileStorage>) -> Result<&UserProfile, AppError> {
    store.profile().ok_or_else(AppError::onboarding_required)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
