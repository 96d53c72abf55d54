//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{error::TrainerError, state::RunnerSnapshot};

/// API response structure for runner command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub runner: RunnerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, runner: RunnerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            runner,
        }
    }

    /// Create a running response
    pub fn running(message: String, runner: RunnerSnapshot) -> Self {
        Self::new("running".to_string(), message, runner)
    }

    /// Create a paused response
    pub fn paused(message: String, runner: RunnerSnapshot) -> Self {
        Self::new("paused".to_string(), message, runner)
    }

    /// Create a stopped response
    pub fn stopped(message: String, runner: RunnerSnapshot) -> Self {
        Self::new("stopped".to_string(), message, runner)
    }
}

/// Status response with runner and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub runner: RunnerSnapshot,
    /// Running and not paused
    pub counting_down: bool,
    pub slot_time_remaining: Option<u64>,
    pub current_route: Option<String>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Workout name availability, used by the builder's remote validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameAvailability {
    pub name: String,
    pub available: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Error body returned for failed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// A [`TrainerError`] rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub TrainerError);

impl From<TrainerError> for ApiError {
    fn from(error: TrainerError) -> Self {
        Self(error)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0 {
            TrainerError::Configuration(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TrainerError::NotFound { .. } => StatusCode::NOT_FOUND,
            TrainerError::AlreadyExists { .. } | TrainerError::NoActiveWorkout => StatusCode::CONFLICT,
            TrainerError::StateLock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.0.to_string(),
            timestamp: Utc::now(),
        };
        (status, Json(body)).into_response()
    }
}
