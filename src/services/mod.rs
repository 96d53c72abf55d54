//! Collaborator services module
//!
//! The workout catalog, the history tracker and navigation used by the runner.

pub mod catalog;
pub mod history;
pub mod navigation;
pub mod workout_service;

// Re-export main types
pub use catalog::Catalog;
pub use history::{HistoryTracker, InMemoryHistoryTracker, WorkoutLogEntry};
pub use navigation::{Navigator, RouteRecorder, FINISH_ROUTE};
pub use workout_service::{InMemoryWorkoutService, WorkoutService};
