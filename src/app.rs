use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/profile", get(handlers::get_profile).put(handlers::put_profile))
        .route("/api/onboarding", post(handlers::onboard))
        .route("/api/data", delete(handlers::reset))
        .route("/api/logs", get(handlers::get_logs))
        .route("/api/logs/:date", get(handlers::get_log).patch(handlers::patch_log))
        .route("/api/logs/:date/meals", post(handlers::add_meal))
        .route("/api/logs/:date/workouts", post(handlers::add_workout))
        .route("/api/logs/:date/water", post(handlers::add_water))
        .route("/api/logs/:date/weight", post(handlers::log_weight))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/weight", get(handlers::get_weight))
        .fallback(handlers::not_found)
        .with_state(state)
}
