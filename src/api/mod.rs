//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/workouts", get(list_workouts_handler))
        .route("/workouts/:name", get(get_workout_handler))
        .route("/workouts/:name/available", get(workout_name_available_handler))
        .route("/workouts/:name/start", post(start_handler))
        .route("/exercises", get(list_exercises_handler))
        .route("/runner/pause", post(pause_handler))
        .route("/runner/resume", post(resume_handler))
        .route("/runner/toggle", post(toggle_handler))
        .route("/runner/stop", post(stop_handler))
        .route("/status", get(status_handler))
        .route("/history", get(history_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
