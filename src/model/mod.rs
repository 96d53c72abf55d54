//! Workout data model
//!
//! Exercises, the plans that schedule them, and the slots a running workout moves through.

pub mod exercise;
pub mod workout;
pub mod slot;

// Re-export main types
pub use exercise::Exercise;
pub use workout::{ExercisePlan, WorkoutPlan};
pub use slot::Slot;
