//! State management module
//!
//! This module contains the workout runner, its snapshots and events, and the shared
//! application state that owns them.

pub mod app_state;
pub mod events;
pub mod runner;
pub mod snapshot;

// Re-export main types
pub use app_state::{AppState, SessionChange};
pub use events::WorkoutEvent;
pub use runner::{RunnerPhase, WorkoutRunner};
pub use snapshot::RunnerSnapshot;
