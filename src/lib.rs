//! Workout Trainer - timed workout sessions over a small HTTP API
//!
//! This library provides the workout runner state machine, the clock that drives it,
//! the workout catalog with its builders, and remote field validation.

pub mod api;
pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::TrainerError;
pub use state::{AppState, WorkoutRunner};
pub use utils::signals::shutdown_signal;
