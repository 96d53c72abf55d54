//! Workout and exercise builders
//!
//! Editing sessions over the workout service: start from a blank or existing record,
//! modify it, then save it back.

pub mod exercise_builder;
pub mod workout_builder;

// Re-export main types
pub use exercise_builder::ExerciseBuilder;
pub use workout_builder::{WorkoutBuilder, WORKOUT_NAME_ERROR_KEY};
