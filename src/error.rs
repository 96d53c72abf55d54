//! Error types shared by the runner, the catalog services and the API

use thiserror::Error;

/// Errors raised by the trainer core and its collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainerError {
    /// The workout cannot be started as configured (aborts before start)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unknown workout or exercise name
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// A record with the same name already exists
    #[error("{kind} already exists: {name}")]
    AlreadyExists { kind: &'static str, name: String },

    /// A runner command was issued while no workout is running
    #[error("No workout is currently running")]
    NoActiveWorkout,

    /// A shared state lock was poisoned
    #[error("Failed to lock {0}")]
    StateLock(String),
}

impl TrainerError {
    pub fn workout_not_found(name: &str) -> Self {
        Self::NotFound { kind: "Workout", name: name.to_string() }
    }

    pub fn exercise_not_found(name: &str) -> Self {
        Self::NotFound { kind: "Exercise", name: name.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, TrainerError>;
