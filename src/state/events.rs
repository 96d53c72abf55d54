//! Lifecycle events emitted by a running workout

use serde::{Deserialize, Serialize};

/// Notification of a runner state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkoutEvent {
    Started { workout: String },
    Paused,
    Resumed,
    ExerciseStarted { index: usize, name: String },
    RestStarted { after: usize, duration: u64 },
    Completed { workout: String },
    Aborted { workout: String },
}
