//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::info;

use crate::{
    builder::workout_builder::is_workout_name_available,
    model::{Exercise, WorkoutPlan},
    services::WorkoutLogEntry,
    state::AppState,
};
use super::responses::{ApiError, ApiResponse, HealthResponse, NameAvailability, StatusResponse};

/// Handle GET /workouts - List all workout plans
pub async fn list_workouts_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<WorkoutPlan>>, ApiError> {
    Ok(Json(state.workouts.get_workouts()?))
}

/// Handle GET /workouts/:name - Fetch one workout plan
pub async fn get_workout_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<WorkoutPlan>, ApiError> {
    Ok(Json(state.workouts.get_workout(&name)?))
}

/// Handle GET /workouts/:name/available - Check whether a workout name is free
pub async fn workout_name_available_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Json<NameAvailability> {
    let available = is_workout_name_available(state.workouts.as_ref(), &name, None);
    Json(NameAvailability { name, available })
}

/// Handle GET /exercises - List all exercises
pub async fn list_exercises_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Exercise>>, ApiError> {
    Ok(Json(state.workouts.get_exercises()?))
}

/// Handle POST /workouts/:name/start - Start running a workout
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let runner = state.start_workout(&name)?;
    info!("Start endpoint called - workout {} started", name);
    Ok(Json(ApiResponse::running(format!("Workout {} started", name), runner)))
}

/// Handle POST /runner/pause - Pause the running workout
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let runner = state.pause()?;
    info!("Pause endpoint called");
    Ok(Json(ApiResponse::paused("Workout paused".to_string(), runner)))
}

/// Handle POST /runner/resume - Resume the paused workout
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let runner = state.resume()?;
    info!("Resume endpoint called");
    Ok(Json(ApiResponse::running("Workout resumed".to_string(), runner)))
}

/// Handle POST /runner/toggle - Pause a running workout or resume a paused one
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let runner = state.toggle_pause()?;
    info!("Toggle endpoint called - paused={}", runner.paused);
    let response = if runner.paused {
        ApiResponse::paused("Workout paused".to_string(), runner)
    } else {
        ApiResponse::running("Workout resumed".to_string(), runner)
    };
    Ok(Json(response))
}

/// Handle POST /runner/stop - Abort the running workout
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let runner = state.stop()?;
    info!("Stop endpoint called");
    Ok(Json(ApiResponse::stopped("Workout stopped".to_string(), runner)))
}

/// Handle GET /status - Return current runner status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
    let runner = state.snapshot()?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        slot_time_remaining: runner.slot_time_remaining(),
        counting_down: runner.is_active(),
        runner,
        current_route: state.navigator.current_route(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /history - Return the workout log, newest first
pub async fn history_handler(State(state): State<Arc<AppState>>) -> Json<Vec<WorkoutLogEntry>> {
    Json(state.tracker.history())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
